mod app;
mod message;
mod screens;
mod widgets;

pub use app::RoomFinderApp;
pub use message::Message;
pub use screens::Route;

use crate::config::Config;

/// Runs the desktop application until its window is closed.
pub fn run(config: Config) -> anyhow::Result<()> {
    iced::application(
        move || RoomFinderApp::new(config.clone()),
        RoomFinderApp::update,
        RoomFinderApp::view,
    )
    .title(RoomFinderApp::title)
    .subscription(RoomFinderApp::subscription)
    .run()?;
    Ok(())
}
