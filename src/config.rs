//! Application configuration.
//!
//! The configuration is a small sectioned TOML document read once at
//! startup. Every key is optional:
//!
//! ```toml
//! [app]
//! name = "rmvvm demo"
//! log_level = "info"
//!
//! [window]
//! width = 1200
//! height = 800
//!
//! [defaults]
//! theme = "light"
//! language = "en"
//! fallback_language = "en"
//!
//! [paths]
//! themes_dir = "assets/themes"
//! locales_dir = "assets/locales"
//! stylesheet = "main.style"
//! data_dir = "data"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR_NAME: &str = "rmvvm";

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub window: WindowSection,
    pub defaults: DefaultsSection,
    pub paths: PathsSection,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    base_dir: PathBuf,

    /// File the values were read from; `None` for built-in defaults.
    #[serde(skip)]
    loaded_from: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub name: String,
    pub log_level: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "rmvvm demo".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DefaultsSection {
    pub theme: String,
    pub language: String,
    pub fallback_language: String,
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            language: "en".to_string(),
            fallback_language: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    pub themes_dir: PathBuf,
    pub locales_dir: PathBuf,
    pub stylesheet: PathBuf,
    /// Where saved fuzzy systems live.
    pub data_dir: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            themes_dir: PathBuf::from("assets/themes"),
            locales_dir: PathBuf::from("assets/locales"),
            stylesheet: PathBuf::from("main.style"),
            data_dir: PathBuf::from("data"),
        }
    }
}

impl AppConfig {
    /// Parses configuration text; relative paths resolve against `base_dir`.
    pub fn from_toml_str(text: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(text)?;
        config.base_dir = base_dir.into();
        Ok(config)
    }

    /// Loads `path`, or returns the defaults when the file does not exist.
    ///
    /// Nothing is logged here: this runs before the subscriber is installed.
    /// Callers report the outcome through [`AppConfig::loaded_from`].
    pub fn load(path: &Path) -> Result<Self> {
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        match fs::read_to_string(path) {
            Ok(text) => {
                let mut config = Self::from_toml_str(&text, base_dir)?;
                config.loaded_from = Some(path.to_path_buf());
                Ok(config)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self {
                    base_dir,
                    ..Self::default()
                })
            }
            Err(source) => Err(Error::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }

    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn themes_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.themes_dir)
    }

    pub fn locales_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.locales_dir)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.data_dir)
    }

    /// Stylesheet template path; relative names are looked up in the themes directory.
    pub fn stylesheet(&self) -> &Path {
        &self.paths.stylesheet
    }
}

/// Picks the configuration file: an explicit path, `./config.toml`, or the
/// per-user configuration directory.
pub fn default_config_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
        .unwrap_or(local)
}

/// Installs the process-wide configuration. Later calls keep the first value.
pub fn initialize(config: AppConfig) {
    CONFIG.get_or_init(|| config);
}

/// The process-wide configuration.
///
/// Fails with [`Error::ConfigNotInitialized`] before [`initialize`] is called.
pub fn get() -> Result<&'static AppConfig> {
    CONFIG.get().ok_or(Error::ConfigNotInitialized)
}
