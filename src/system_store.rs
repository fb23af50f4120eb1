//! Saved fuzzy systems.
//!
//! Each system is one `fuzzy_system_<slug>.json` file in the data directory,
//! where the slug is the system name lower-cased with spaces replaced by `_`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, ResourceKind, Result};
use crate::models::FuzzySystem;
use crate::palette::JSON_EXTENSION;

const FILE_PREFIX: &str = "fuzzy_system_";

#[derive(Debug, Clone)]
pub struct FuzzySystemStore {
    dir: PathBuf,
}

impl FuzzySystemStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing the system called `name`.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        let slug = slug(name);
        Error::check_name(ResourceKind::FuzzySystem, &slug)?;
        Ok(self.dir.join(format!("{FILE_PREFIX}{slug}.{JSON_EXTENSION}")))
    }

    /// Names of the saved systems, recovered from their file names.
    pub fn list(&self) -> BTreeSet<String> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(dir = %self.dir.display(), %err, "data directory not readable");
                return BTreeSet::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter_map(|path| {
                let file_name = path.file_name()?.to_str()?;
                let slug = file_name
                    .strip_prefix(FILE_PREFIX)?
                    .strip_suffix(JSON_EXTENSION)?
                    .strip_suffix('.')?;
                (!slug.is_empty()).then(|| slug.replace('_', " "))
            })
            .collect()
    }

    /// Writes the system under its own name and returns the file path.
    pub fn save(&self, system: &FuzzySystem) -> Result<PathBuf> {
        let path = self.path_for(&system.name)?;
        let text = serde_json::to_string_pretty(system).map_err(|source| Error::Parse {
            path: path.clone(),
            source,
        })?;
        fs::create_dir_all(&self.dir).map_err(|source| Error::Io {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(&path, text).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        info!(system = %system.name, path = %path.display(), "fuzzy system saved");
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<FuzzySystem> {
        let path = self.path_for(name)?;
        let text = fs::read_to_string(&path)
            .map_err(|source| Error::io(ResourceKind::FuzzySystem, name, path.clone(), source))?;
        let system: FuzzySystem =
            serde_json::from_str(&text).map_err(|source| Error::Parse { path, source })?;
        info!(system = %system.name, "fuzzy system loaded");
        Ok(system)
    }
}

fn slug(name: &str) -> String {
    name.trim().replace(' ', "_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_list_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FuzzySystemStore::new(dir.path().join("data"));
        assert!(store.list().is_empty());

        let mut system = FuzzySystem::new("sys-1", "Room Climate", "");
        system.add_input_variable("temperature");
        let path = store.save(&system).unwrap();

        assert_eq!(path.file_name().unwrap(), "fuzzy_system_room_climate.json");
        assert_eq!(store.list().into_iter().collect::<Vec<_>>(), vec!["room climate"]);
        assert_eq!(store.load("room climate").unwrap(), system);
        assert_eq!(store.load("Room Climate").unwrap(), system);
    }

    #[test]
    fn test_unrelated_files_are_not_listed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.json"), "{}").unwrap();
        fs::write(dir.path().join("fuzzy_system_.json"), "{}").unwrap();
        fs::write(dir.path().join("fuzzy_system_a.txt"), "{}").unwrap();
        let store = FuzzySystemStore::new(dir.path());

        assert!(store.list().is_empty());
        assert!(store.load("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_broken_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fuzzy_system_bad.json"), "{ nope").unwrap();
        let store = FuzzySystemStore::new(dir.path());

        assert!(matches!(store.load("bad"), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_names_cannot_leave_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = FuzzySystemStore::new(dir.path().join("data"));
        let system = FuzzySystem::new("x", "../up", "");

        assert!(matches!(store.save(&system), Err(Error::InvalidName { .. })));
        assert!(matches!(store.load("   "), Err(Error::InvalidName { .. })));
    }
}
