//! Theme selection state and change notification.
//!
//! [`ThemeContext`] starts [`ThemeState::Unset`] and moves to
//! [`ThemeState::Active`] on the first successful [`ThemeContext::select_theme`].
//! There is no way back to `Unset`; a theme is only ever replaced.
//!
//! Views subscribe with [`ThemeContext::subscribe`] and, when their
//! subscription reports a change, pull the new palette and re-resolve their
//! own stylesheet. The context never pushes rendered output.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::colors::{color_slots_with_defaults, ThemeColors};
use crate::error::{Error, ResourceKind, Result};
use crate::notify::{ChangeNotifier, Subscription};
use crate::palette::{FlatPalette, Palette, PaletteStore};
use crate::stylesheet;

/// Selection state of a [`ThemeContext`].
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeState {
    Unset,
    Active { name: String, palette: Palette },
}

pub struct ThemeContext {
    store: PaletteStore,
    known: BTreeSet<String>,
    state: ThemeState,
    notifier: ChangeNotifier,
}

impl std::fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeContext")
            .field("themes_dir", &self.store.dir())
            .field("current", &self.current_theme())
            .finish_non_exhaustive()
    }
}

impl ThemeContext {
    /// Creates a context over `themes_dir`, discovering themes once.
    pub fn new(themes_dir: impl Into<PathBuf>) -> Self {
        let store = PaletteStore::new(themes_dir);
        let known = store.discover();
        info!(dir = %store.dir().display(), count = known.len(), "discovered themes");
        Self {
            store,
            known,
            state: ThemeState::Unset,
            notifier: ChangeNotifier::new(),
        }
    }

    // ===== Queries =====

    pub fn themes_dir(&self) -> &Path {
        self.store.dir()
    }

    pub fn state(&self) -> &ThemeState {
        &self.state
    }

    /// Sorted names of the themes found at the last discovery.
    pub fn available_themes(&self) -> Vec<String> {
        self.known.iter().cloned().collect()
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    pub fn current_theme(&self) -> Option<&str> {
        match &self.state {
            ThemeState::Unset => None,
            ThemeState::Active { name, .. } => Some(name),
        }
    }

    pub fn palette(&self) -> Option<&Palette> {
        match &self.state {
            ThemeState::Unset => None,
            ThemeState::Active { palette, .. } => Some(palette),
        }
    }

    /// Flattened view of the active palette; empty while unset.
    pub fn flattened_palette(&self) -> FlatPalette {
        self.palette().map(Palette::flatten).unwrap_or_default()
    }

    pub fn colors(&self) -> ThemeColors {
        ThemeColors::from_palette(&self.flattened_palette())
    }

    /// Reads the template at `path` and resolves it against the active palette.
    ///
    /// Relative paths are looked up in the themes directory first. A template
    /// that cannot be read produces an empty stylesheet.
    pub fn load_stylesheet(&self, path: impl AsRef<Path>) -> String {
        stylesheet::load_stylesheet(path.as_ref(), self.store.dir(), &self.flattened_palette())
    }

    pub fn subscribe(&mut self) -> Subscription {
        self.notifier.subscribe()
    }

    // ===== Mutations =====

    /// Activates a discovered theme and notifies subscribers.
    ///
    /// Unknown names and unreadable palettes leave the current theme in place
    /// and send no notification.
    pub fn select_theme(&mut self, name: &str) -> Result<()> {
        if !self.known.contains(name) {
            warn!(theme = name, "theme not available");
            return Err(Error::not_found(ResourceKind::Theme, name));
        }

        let palette = self.store.load(name).inspect_err(|err| {
            warn!(theme = name, %err, "failed to load palette");
        })?;

        self.state = ThemeState::Active {
            name: name.to_string(),
            palette,
        };
        info!(theme = name, "theme applied");
        self.notifier.notify();
        Ok(())
    }

    /// Re-scans the themes directory. The active theme stays active.
    pub fn refresh(&mut self) -> &BTreeSet<String> {
        self.known = self.store.discover();
        &self.known
    }

    /// Writes a palette to `<name>.json` and makes it selectable.
    pub fn save_theme(&mut self, name: &str, palette: &Palette) -> Result<()> {
        let path = self.store.save(name, palette).inspect_err(|err| {
            warn!(theme = name, %err, "failed to save theme");
        })?;
        info!(theme = name, path = %path.display(), "theme saved");
        self.known.insert(name.to_string());
        Ok(())
    }

    /// Builds a palette with the standard color slots and saves it.
    pub fn create_custom_theme(
        &mut self,
        name: &str,
        description: &str,
        colors: &Map<String, Value>,
    ) -> Result<Palette> {
        let mut root = Map::new();
        root.insert("name".into(), Value::String(name.to_string()));
        root.insert("description".into(), Value::String(description.to_string()));
        root.insert("colors".into(), Value::Object(color_slots_with_defaults(colors)));

        let palette = Palette::new(name, root);
        self.save_theme(name, &palette)?;
        Ok(palette)
    }

    /// Deletes a theme file. The active theme cannot be deleted.
    pub fn delete_theme(&mut self, name: &str) -> Result<()> {
        if self.current_theme() == Some(name) {
            warn!(theme = name, "refusing to delete the active theme");
            return Err(Error::ThemeInUse(name.to_string()));
        }
        self.store.delete(name).inspect_err(|err| {
            warn!(theme = name, %err, "failed to delete theme");
        })?;
        self.known.remove(name);
        info!(theme = name, "theme deleted");
        Ok(())
    }
}
