use std::sync::Arc;

use iced::{Element, Subscription, Task};
use tracing::error;

use crate::{
    config::Config,
    core::{AppState, db::SqliteStore},
    gui::{
        Message,
        screens::{Route, Screen, ScreenData, ScreenMessage, loading_page},
        widgets::APP_NAME,
    },
};

pub struct RoomFinderApp {
    config: Config,
    state: Option<AppState>,
    screen: Option<ScreenData>,
    startup_error: Option<String>,
}

fn into_root(message: ScreenMessage<ScreenData>) -> Message {
    match message {
        ScreenMessage::ScreenMessage(message) => message,
        ScreenMessage::ParentMessage(never) => match never {},
    }
}

impl RoomFinderApp {
    pub fn new(config: Config) -> (Self, Task<Message>) {
        let path = config.store_path.clone();
        (
            Self {
                config,
                state: None,
                screen: None,
                startup_error: None,
            },
            Task::perform(
                async move {
                    SqliteStore::open(path)
                        .await
                        .map(Arc::new)
                        .map_err(|e| format!("{e:#}"))
                },
                Message::StoreOpened,
            ),
        )
    }

    pub fn title(&self) -> String {
        match &self.screen {
            Some(ScreenData::RoomDetail(page)) => match page.title() {
                Some(title) => format!("{title} - {APP_NAME}"),
                None => APP_NAME.to_string(),
            },
            _ => APP_NAME.to_string(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::StoreOpened(Ok(store)) => {
                let state = AppState::new(store, self.config.clone());
                let (screen, task) = ScreenData::open(Route::initial(&self.config), &state);
                self.state = Some(state);
                self.screen = Some(screen);
                task
            }
            Message::StoreOpened(Err(e)) => {
                error!(error = %e, "could not open client storage");
                self.startup_error = Some(e);
                Task::none()
            }
            message => match (&mut self.screen, &mut self.state) {
                (Some(screen), Some(state)) => screen.update(message, state).map(into_root),
                _ => Task::none(),
            },
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match (&self.screen, &self.state) {
            (Some(screen), Some(state)) => screen.view(state).map(into_root),
            _ => loading_page::view(self.startup_error.as_deref()),
        }
    }

    /// The image carousel timer exists only while a screen showing images is
    /// active; switching screens drops it.
    pub fn subscription(&self) -> Subscription<Message> {
        match &self.screen {
            Some(screen) if screen.shows_carousel() => {
                iced::time::every(self.config.carousel_interval).map(|_| Message::CarouselTick)
            }
            _ => Subscription::none(),
        }
    }
}
