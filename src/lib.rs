//! Room Finder: browse, search and manage rental room listings.
//!
//! The [`core`] module holds everything that does not depend on a user
//! interface. The `gui` feature adds the desktop application.

pub mod config;
pub mod core;

pub use config::Config;
pub use core::AppState;

#[cfg(feature = "gui")]
pub mod gui;
