//! Theme management view model.
//!
//! Works against the shared [`ThemeContext`]; the editor fields are the only
//! state it owns.

use std::fs;
use std::path::Path;

use egui::Color32;
use rmvvm::colors::{color32_to_hex, DEFAULT_COLOR_SLOTS};
use rmvvm::{hex_to_color32, PaletteStore, ThemeContext};
use serde_json::{Map, Value};
use tracing::info;

/// Editor state for creating custom themes.
pub struct ThemeViewModel {
    pub new_name: String,
    pub new_description: String,
    /// Editable colors, one per standard slot
    pub slot_colors: Vec<(&'static str, Color32)>,
    status: Option<String>,
}

impl Default for ThemeViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeViewModel {
    pub fn new() -> Self {
        let slot_colors = DEFAULT_COLOR_SLOTS
            .iter()
            .map(|(slot, hex)| (*slot, hex_to_color32(hex).unwrap_or(Color32::BLACK)))
            .collect();
        Self {
            new_name: String::new(),
            new_description: String::new(),
            slot_colors,
            status: None,
        }
    }

    /// Last outcome message, for display under the editor.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// `colors.*` entries of the active palette, as `(slot, value)` pairs.
    pub fn palette_slots(themes: &ThemeContext) -> Vec<(String, String)> {
        themes
            .flattened_palette()
            .into_iter()
            .filter_map(|(key, value)| key.strip_prefix("colors.").map(|slot| (slot.to_string(), value)))
            .collect()
    }

    /// Copies the active palette's colors into the editor.
    pub fn load_from_current(&mut self, themes: &ThemeContext) {
        let colors = themes.colors();
        self.slot_colors = colors.slots().to_vec();
    }

    pub fn apply(&mut self, themes: &mut ThemeContext, name: &str) -> bool {
        match themes.select_theme(name) {
            Ok(()) => {
                self.status = None;
                true
            }
            Err(err) => {
                self.status = Some(err.to_string());
                false
            }
        }
    }

    /// Saves the editor as a new theme. The name must not be blank.
    pub fn create(&mut self, themes: &mut ThemeContext) -> bool {
        let name = self.new_name.trim().to_string();
        if name.is_empty() {
            self.status = Some("theme name is required".to_string());
            return false;
        }

        let colors: Map<String, Value> = self
            .slot_colors
            .iter()
            .map(|(slot, color)| (slot.to_string(), Value::String(color32_to_hex(*color))))
            .collect();

        match themes.create_custom_theme(&name, self.new_description.trim(), &colors) {
            Ok(_) => {
                info!(theme = %name, "custom theme created");
                self.status = Some(format!("saved theme '{name}'"));
                self.new_name.clear();
                self.new_description.clear();
                true
            }
            Err(err) => {
                self.status = Some(err.to_string());
                false
            }
        }
    }

    pub fn delete(&mut self, themes: &mut ThemeContext, name: &str) -> bool {
        match themes.delete_theme(name) {
            Ok(()) => {
                self.status = Some(format!("deleted theme '{name}'"));
                true
            }
            Err(err) => {
                self.status = Some(err.to_string());
                false
            }
        }
    }

    /// Copies a palette file into the themes directory and re-discovers themes.
    ///
    /// The file must parse as a palette before it is copied.
    pub fn import(&mut self, themes: &mut ThemeContext, source: &Path) -> bool {
        let result = (|| -> anyhow::Result<String> {
            let name = source
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| anyhow::anyhow!("invalid file name"))?
                .to_string();
            let staging = PaletteStore::new(source.parent().unwrap_or(Path::new(".")));
            let palette = staging.load(&name)?;
            PaletteStore::new(themes.themes_dir()).save(&name, &palette)?;
            Ok(name)
        })();

        match result {
            Ok(name) => {
                themes.refresh();
                info!(theme = %name, source = %source.display(), "theme imported");
                self.status = Some(format!("imported theme '{name}'"));
                true
            }
            Err(err) => {
                self.status = Some(format!("import failed: {err:#}"));
                false
            }
        }
    }

    /// Raw text of a theme file, for the preview pane.
    pub fn read_source(themes: &ThemeContext, name: &str) -> Option<String> {
        let path = PaletteStore::new(themes.themes_dir()).path_for(name).ok()?;
        fs::read_to_string(path).ok()
    }
}
