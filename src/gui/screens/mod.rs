pub mod dashboard;
pub mod loading_page;
pub mod login;
pub mod room_detail;

use std::convert::Infallible;

use iced::{Element, Task};
use tracing::{debug, warn};

use crate::{
    config::Config,
    core::{
        AppState,
        db::{Favorites, FavoritesRepository},
    },
    gui::Message,
};

/// Where a screen can send the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login { register: bool },
    Dashboard,
    /// Raw route parameter; the detail screen decides whether it names a
    /// listing.
    Room(String),
}

impl Route {
    /// Where the application starts: a room page when one was asked for,
    /// otherwise the login screen in the requested mode.
    pub fn initial(config: &Config) -> Self {
        match &config.initial_room {
            Some(room) => Route::Room(room.clone()),
            None => Route::Login {
                register: config.register,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

/// Requests a screen makes of the screen host.
#[derive(Debug, Clone)]
pub enum ParentMessage {
    Navigate(Route),
    /// Persist this favorites set. The host owns the write so it completes
    /// even if the screen is closed meanwhile.
    SaveFavorites(Favorites),
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug;
    type ParentMessage: std::fmt::Debug;
    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
}

pub(crate) fn navigate<S: Screen<ParentMessage = ParentMessage>>(route: Route) -> Task<ScreenMessage<S>>
where
    ScreenMessage<S>: Send + 'static,
{
    Task::done(ScreenMessage::ParentMessage(ParentMessage::Navigate(route)))
}

/// Hands a favorites set returned by [`AppState::toggle_favorite_local`] to
/// the host for writing.
pub(crate) fn persist_favorites<S: Screen<ParentMessage = ParentMessage>>(
    pending: Option<Favorites>,
) -> Task<ScreenMessage<S>>
where
    ScreenMessage<S>: Send + 'static,
{
    match pending {
        Some(favorites) => Task::done(ScreenMessage::ParentMessage(ParentMessage::SaveFavorites(
            favorites,
        ))),
        None => Task::none(),
    }
}

#[derive(Debug, Clone)]
pub enum ScreenData {
    Login(login::LoginScreen),
    Dashboard(dashboard::DashboardScreen),
    RoomDetail(room_detail::RoomDetailScreen),
}

impl ScreenData {
    /// Builds the screen for `route` along with its activation task.
    pub fn open(route: Route, state: &AppState) -> (Self, Task<Message>) {
        debug!(?route, "opening screen");
        match route {
            Route::Login { register } => {
                let (screen, task) = login::LoginScreen::open(register, state);
                (ScreenData::Login(screen), task.map(Message::Login))
            }
            Route::Dashboard => {
                let (screen, task) = dashboard::DashboardScreen::open(state);
                (ScreenData::Dashboard(screen), task.map(Message::Dashboard))
            }
            Route::Room(param) => {
                let (screen, task) = room_detail::RoomDetailScreen::open(&param, state);
                (ScreenData::RoomDetail(screen), task.map(Message::RoomDetail))
            }
        }
    }

    pub fn shows_carousel(&self) -> bool {
        match self {
            ScreenData::Login(_) => false,
            ScreenData::Dashboard(_) => true,
            ScreenData::RoomDetail(page) => page.title().is_some(),
        }
    }

    fn forward<S>(
        page: &mut S,
        message: ScreenMessage<S>,
        state: &mut AppState,
        wrap: fn(ScreenMessage<S>) -> Message,
    ) -> Task<ScreenMessage<Self>>
    where
        S: Screen<ParentMessage = ParentMessage>,
        ScreenMessage<S>: Send + 'static,
    {
        match message {
            ScreenMessage::ScreenMessage(message) => page
                .update(message, state)
                .map(wrap)
                .map(ScreenMessage::<ScreenData>::ScreenMessage),
            ScreenMessage::ParentMessage(ParentMessage::Navigate(route)) => {
                Task::done(ScreenMessage::ScreenMessage(Message::Navigate(route)))
            }
            ScreenMessage::ParentMessage(ParentMessage::SaveFavorites(favorites)) => {
                Task::done(ScreenMessage::ScreenMessage(Message::SaveFavorites(favorites)))
            }
        }
    }

    fn save_favorites(favorites: Favorites, state: &AppState) -> Task<ScreenMessage<Self>> {
        let store = state.store();
        Task::perform(
            async move {
                store
                    .save_favorites(&favorites)
                    .await
                    .map_err(|e| format!("{e:#}"))
            },
            |saved| ScreenMessage::ScreenMessage(Message::FavoritesSaved(saved)),
        )
    }
}

impl Screen for ScreenData {
    type Message = Message;
    type ParentMessage = Infallible;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        match self {
            ScreenData::Login(screen) => screen.view(state).map(Message::Login),
            ScreenData::Dashboard(screen) => screen.view(state).map(Message::Dashboard),
            ScreenData::RoomDetail(screen) => screen.view(state).map(Message::RoomDetail),
        }
        .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match (self, message) {
            (x, Message::Navigate(route)) => {
                let (screen, task) = ScreenData::open(route, state);
                *x = screen;
                task.map(ScreenMessage::ScreenMessage)
            }
            (_, Message::SaveFavorites(favorites)) => Self::save_favorites(favorites, state),
            (_, Message::FavoritesSaved(saved)) => {
                if let Err(e) = saved {
                    warn!(error = %e, "favorites were not persisted");
                }
                match state.favorites_saved() {
                    Some(favorites) => Self::save_favorites(favorites, state),
                    None => Task::none(),
                }
            }
            (ScreenData::Dashboard(page), Message::CarouselTick) => Self::forward(
                page,
                ScreenMessage::ScreenMessage(dashboard::DashboardMessage::CarouselTick),
                state,
                Message::Dashboard,
            ),
            (ScreenData::RoomDetail(page), Message::CarouselTick) => Self::forward(
                page,
                ScreenMessage::ScreenMessage(room_detail::RoomDetailMessage::CarouselTick),
                state,
                Message::RoomDetail,
            ),
            (ScreenData::Login(page), Message::Login(msg)) => {
                Self::forward(page, msg, state, Message::Login)
            }
            (ScreenData::Dashboard(page), Message::Dashboard(msg)) => {
                Self::forward(page, msg, state, Message::Dashboard)
            }
            (ScreenData::RoomDetail(page), Message::RoomDetail(msg)) => {
                Self::forward(page, msg, state, Message::RoomDetail)
            }
            // Results for a screen that is no longer showing, e.g. a listing
            // fetch that completed after the user left the detail page.
            (_, message) => {
                debug!(?message, "discarding message for inactive screen");
                Task::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_route() {
        let mut config = Config::default();
        assert_eq!(Route::initial(&config), Route::Login { register: false });

        config.register = true;
        assert_eq!(Route::initial(&config), Route::Login { register: true });

        config.initial_room = Some("abc".to_string());
        assert_eq!(Route::initial(&config), Route::Room("abc".to_string()));
    }
}
