//! Application-level modules for the MVVM demo.
//!
//! This module contains the coordinators and the centralized state the GUI
//! works against.

mod app_state;
mod application_coordinator;
mod theme_coordinator;
mod settings_coordinator;

pub use app_state::{AppState, ViewCaches};
pub use application_coordinator::ApplicationCoordinator;
pub use theme_coordinator::ThemeCoordinator;
pub use settings_coordinator::{Preferences, SettingsCoordinator, PREFERENCES_KEY};
