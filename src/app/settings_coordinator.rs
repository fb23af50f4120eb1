//! Preference persistence through eframe storage.
//!
//! Values are stored as JSON strings. Persistence is best effort: a missing or
//! unreadable entry falls back to a default and is never reported to the user.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::state::ActiveView;

pub const PREFERENCES_KEY: &str = "preferences";

/// What is restored at the next start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Theme to select instead of the configured default
    pub theme: Option<String>,
    /// Language to select instead of the configured default
    pub language: Option<String>,
    pub last_view: ActiveView,
    pub counter: i32,
}

/// Coordinates settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting, falling back to `T::default()`.
    pub fn load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> T
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        Self::try_load_setting(storage, key).unwrap_or_default()
    }

    /// Loads a setting, returning None if it is absent or does not parse.
    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let json_str = storage?.get_string(key)?;
        serde_json::from_str(&json_str)
            .inspect_err(|err| warn!(key, %err, "ignoring unreadable setting"))
            .ok()
    }

    /// Serializes `value` under `key` and flushes the storage.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => {
                storage.set_string(key, json_str);
                storage.flush();
                debug!(key, "setting saved");
            }
            Err(err) => warn!(key, %err, "failed to serialize setting"),
        }
    }

    pub fn load_preferences(storage: Option<&dyn eframe::Storage>) -> Preferences {
        Self::load_setting(storage, PREFERENCES_KEY)
    }

    pub fn save_preferences(storage: &mut dyn eframe::Storage, preferences: &Preferences) {
        Self::save_setting(storage, PREFERENCES_KEY, preferences);
    }
}
