use std::{path::PathBuf, time::Duration};

pub const DEFAULT_STORE_PATH: &str = "roomfinder.db";

/// Runtime settings, resolved once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite file backing client storage.
    pub store_path: PathBuf,
    /// How long the simulated listing fetch takes.
    pub fetch_delay: Duration,
    /// Image auto-advance interval.
    pub carousel_interval: Duration,
    /// Open the login screen in register mode.
    pub register: bool,
    /// Raw room route parameter to open on start.
    pub initial_room: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            fetch_delay: Duration::from_millis(1000),
            carousel_interval: Duration::from_secs(5),
            register: false,
            initial_room: None,
        }
    }
}
