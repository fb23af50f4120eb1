//! Error types shared by the theme, translation and configuration layers.

use std::path::PathBuf;
use thiserror::Error;

/// What kind of named resource a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Theme,
    Language,
    Stylesheet,
    FuzzySystem,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Theme => f.write_str("theme"),
            ResourceKind::Language => f.write_str("language"),
            ResourceKind::Stylesheet => f.write_str("stylesheet"),
            ResourceKind::FuzzySystem => f.write_str("fuzzy system"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind} '{name}' not found")]
    NotFound { kind: ResourceKind, name: String },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} is not a JSON object", path.display())]
    NotAnObject { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {kind} name '{name}'")]
    InvalidName { kind: ResourceKind, name: String },

    #[error("theme '{0}' is active and cannot be deleted")]
    ThemeInUse(String),

    #[error("configuration accessed before initialization")]
    ConfigNotInitialized,

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn not_found(kind: ResourceKind, name: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Rejects names that cannot be used as a single file stem: blank names,
    /// path separators, and names starting with a dot (`.`, `..`, hidden files).
    pub(crate) fn check_name(kind: ResourceKind, name: &str) -> Result<()> {
        let invalid = name.trim().is_empty()
            || name.starts_with('.')
            || name.contains(['/', '\\', '\0']);
        if invalid {
            return Err(Error::InvalidName {
                kind,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Wraps an I/O error, mapping `ErrorKind::NotFound` onto [`Error::NotFound`].
    pub(crate) fn io(kind: ResourceKind, name: &str, path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::not_found(kind, name)
        } else {
            Error::Io { path, source }
        }
    }

    /// True for lookups of themes, languages or files that do not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
