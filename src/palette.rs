//! Palette files: discovery, loading, saving and flattening.
//!
//! A theme is one `<name>.json` file in the themes directory. Its contents are
//! an object whose leaves are color strings, nested to any depth:
//!
//! ```json
//! { "colors": { "background": "#111111", "text": "#eeeeee" } }
//! ```
//!
//! Templates refer to leaves by their dot-joined path (`colors.background`),
//! so most consumers work with the [`FlatPalette`] produced by [`flatten`].

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, ResourceKind, Result};

/// Extension recognized for palette (and locale) files.
pub const JSON_EXTENSION: &str = "json";

/// Dot-path keyed, single-level view of a palette.
pub type FlatPalette = BTreeMap<String, String>;

/// A named, nested set of color tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    root: Map<String, Value>,
}

impl Palette {
    pub fn new(name: impl Into<String>, root: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Parses palette JSON text. The top level must be an object.
    pub fn from_json_str(name: impl Into<String>, text: &str, path: &Path) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        match value {
            Value::Object(root) => Ok(Self::new(name, root)),
            _ => Err(Error::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Looks up a leaf by its dotted path, e.g. `colors.background`.
    pub fn get(&self, dotted: &str) -> Option<String> {
        let mut parts = dotted.split('.');
        let first = parts.next()?;
        let mut current = self.root.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        leaf_text(current)
    }

    pub fn flatten(&self) -> FlatPalette {
        flatten(&self.root)
    }
}

/// Flattens a nested JSON object into dot-joined keys.
///
/// String leaves are kept verbatim; other scalars use their JSON text.
pub fn flatten(root: &Map<String, Value>) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    flatten_into(root, "", &mut out);
    out
}

fn flatten_into(map: &Map<String, Value>, prefix: &str, out: &mut BTreeMap<String, String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(nested) => flatten_into(nested, &path, out),
            other => {
                if let Some(text) = leaf_text(other) {
                    out.insert(path, text);
                }
            }
        }
    }
}

fn leaf_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => None,
        Value::Null => Some(String::new()),
        other => Some(other.to_string()),
    }
}

/// Reads and writes palette files in a single themes directory.
///
/// The store keeps no state besides the directory: every call re-scans or
/// re-reads the disk, so edits made outside the application show up on the
/// next load.
#[derive(Debug, Clone)]
pub struct PaletteStore {
    dir: PathBuf,
}

impl PaletteStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing theme `name`. Names that would leave the directory are rejected.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        Error::check_name(ResourceKind::Theme, name)?;
        Ok(self.dir.join(format!("{name}.{JSON_EXTENSION}")))
    }

    /// Returns the names of every `*.json` file in the themes directory.
    ///
    /// A missing or unreadable directory yields an empty set.
    pub fn discover(&self) -> BTreeSet<String> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(dir = %self.dir.display(), %err, "themes directory not readable");
                return BTreeSet::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_json_extension(path))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_owned))
            .collect()
    }

    /// Reads and parses `<name>.json`.
    pub fn load(&self, name: &str) -> Result<Palette> {
        let path = self.path_for(name)?;
        let text = fs::read_to_string(&path)
            .map_err(|source| Error::io(ResourceKind::Theme, name, path.clone(), source))?;
        Palette::from_json_str(name, &text, &path)
    }

    /// Writes a palette as pretty-printed JSON, creating the directory if needed.
    pub fn save(&self, name: &str, palette: &Palette) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.dir).map_err(|source| Error::Io {
            path: self.dir.clone(),
            source,
        })?;
        let text = serde_json::to_string_pretty(&Value::Object(palette.root.clone()))
            .map_err(|source| Error::Parse {
                path: path.clone(),
                source,
            })?;
        fs::write(&path, text).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.path_for(name)?;
        fs::remove_file(&path).map_err(|source| Error::io(ResourceKind::Theme, name, path, source))
    }
}

/// Exact, case-sensitive match: loading builds `<name>.json`, so `Ocean.JSON`
/// would be listed but never load.
pub(crate) fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == JSON_EXTENSION)
}
