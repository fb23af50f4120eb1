//! Mapping of palette color slots onto egui visuals.
//!
//! Palettes name twelve standard slots under `colors.*`. This module turns a
//! flattened palette into concrete [`Color32`] values and applies them to an
//! [`egui::Visuals`], so the native widgets follow the selected theme just
//! like the resolved stylesheet does.
//!
//! # Examples
//!
//! ```
//! use rmvvm::colors::{hex_to_color32, ThemeColors};
//! use rmvvm::FlatPalette;
//!
//! let mut flat = FlatPalette::new();
//! flat.insert("colors.background".into(), "#282a36".into());
//! let colors = ThemeColors::from_palette(&flat);
//! assert_eq!(Some(colors.background), hex_to_color32("#282a36"));
//! assert!(colors.is_dark());
//! ```

use egui::Color32;
use serde_json::{Map, Value};

use crate::palette::FlatPalette;

/// The standard color slots and their built-in values.
pub const DEFAULT_COLOR_SLOTS: [(&str, &str); 12] = [
    ("background", "#f5f5f5"),
    ("surface", "#ffffff"),
    ("primary", "#0078d4"),
    ("primary_hover", "#106ebe"),
    ("secondary", "#f8f9fa"),
    ("text", "#333333"),
    ("text_secondary", "#666666"),
    ("border", "#e0e0e0"),
    ("border_light", "#d0d0d0"),
    ("success", "#28a745"),
    ("warning", "#ffc107"),
    ("error", "#dc3545"),
];

/// Builds the `colors` object of a palette, filling omitted slots with defaults.
///
/// Slots the caller supplies beyond the standard twelve are kept as well.
pub fn color_slots_with_defaults(overrides: &Map<String, Value>) -> Map<String, Value> {
    let mut colors = Map::new();
    for (slot, default) in DEFAULT_COLOR_SLOTS {
        let value = overrides
            .get(slot)
            .cloned()
            .unwrap_or_else(|| Value::String(default.to_string()));
        colors.insert(slot.to_string(), value);
    }
    for (slot, value) in overrides {
        if !colors.contains_key(slot) {
            colors.insert(slot.clone(), value.clone());
        }
    }
    colors
}

/// Concrete colors for every standard slot
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    pub background: Color32,
    pub surface: Color32,
    pub primary: Color32,
    pub primary_hover: Color32,
    pub secondary: Color32,
    pub text: Color32,
    pub text_secondary: Color32,
    pub border: Color32,
    pub border_light: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::from_palette(&FlatPalette::new())
    }
}

impl ThemeColors {
    /// Reads `colors.<slot>` entries; missing or unparsable entries use the default.
    pub fn from_palette(flat: &FlatPalette) -> Self {
        let slot = |name: &str| -> Color32 {
            let default = DEFAULT_COLOR_SLOTS
                .iter()
                .find(|(slot, _)| *slot == name)
                .map(|(_, hex)| *hex)
                .unwrap_or("#000000");
            flat.get(&format!("colors.{name}"))
                .and_then(|hex| hex_to_color32(hex))
                .or_else(|| hex_to_color32(default))
                .unwrap_or(Color32::BLACK)
        };

        Self {
            background: slot("background"),
            surface: slot("surface"),
            primary: slot("primary"),
            primary_hover: slot("primary_hover"),
            secondary: slot("secondary"),
            text: slot("text"),
            text_secondary: slot("text_secondary"),
            border: slot("border"),
            border_light: slot("border_light"),
            success: slot("success"),
            warning: slot("warning"),
            error: slot("error"),
        }
    }

    /// Slot names paired with their colors, in declaration order.
    pub fn slots(&self) -> [(&'static str, Color32); 12] {
        [
            ("background", self.background),
            ("surface", self.surface),
            ("primary", self.primary),
            ("primary_hover", self.primary_hover),
            ("secondary", self.secondary),
            ("text", self.text),
            ("text_secondary", self.text_secondary),
            ("border", self.border),
            ("border_light", self.border_light),
            ("success", self.success),
            ("warning", self.warning),
            ("error", self.error),
        ]
    }

    /// True when the background is dark enough to warrant egui's dark base visuals.
    pub fn is_dark(&self) -> bool {
        relative_luminance(self.background) < 0.5
    }

    /// Base visuals matching the background, with the palette applied.
    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = if self.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        self.apply(&mut visuals);
        visuals
    }

    /// Applies the palette to egui visuals
    pub fn apply(&self, visuals: &mut egui::Visuals) {
        // Backgrounds
        visuals.panel_fill = self.background;
        visuals.window_fill = self.surface;
        visuals.extreme_bg_color = self.surface;
        visuals.faint_bg_color = self.secondary;

        visuals.override_text_color = Some(self.text);

        visuals.selection.bg_fill = with_alpha(self.primary, 160);
        visuals.selection.stroke.color = self.primary;

        visuals.widgets.noninteractive.bg_fill = self.background;
        visuals.widgets.noninteractive.bg_stroke.color = self.border;
        visuals.widgets.noninteractive.fg_stroke.color = self.text_secondary;
        visuals.widgets.inactive.bg_fill = self.secondary;
        visuals.widgets.inactive.weak_bg_fill = self.secondary;
        visuals.widgets.inactive.bg_stroke.color = self.border_light;
        visuals.widgets.hovered.bg_fill = self.primary_hover;
        visuals.widgets.hovered.weak_bg_fill = adjust_brightness(self.secondary, 0.92);
        visuals.widgets.active.bg_fill = self.primary;
        visuals.widgets.active.weak_bg_fill = self.primary;

        visuals.hyperlink_color = self.primary;
        visuals.error_fg_color = self.error;
        visuals.warn_fg_color = self.warning;
    }
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
pub fn hex_to_color32(hex: &str) -> Option<Color32> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                rgb[i] = v * 17;
            }
            Some(Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
        }
        6 => Some(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color32::from_rgba_unmultiplied(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)?,
        )),
        _ => None,
    }
}

/// Formats a color as `#rrggbb`, ignoring alpha.
pub fn color32_to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Adjusts the brightness of a color by a factor (1.0 = no change, >1.0 = brighter, <1.0 = darker)
pub fn adjust_brightness(color: Color32, factor: f32) -> Color32 {
    let r = (color.r() as f32 * factor).min(255.0) as u8;
    let g = (color.g() as f32 * factor).min(255.0) as u8;
    let b = (color.b() as f32 * factor).min(255.0) as u8;
    Color32::from_rgb(r, g, b)
}

/// Sets the alpha channel of a color
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn relative_luminance(color: Color32) -> f32 {
    (0.2126 * color.r() as f32 + 0.7152 * color.g() as f32 + 0.0722 * color.b() as f32) / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing_forms() {
        assert_eq!(hex_to_color32("#ff0000"), Some(Color32::from_rgb(255, 0, 0)));
        assert_eq!(hex_to_color32("0f0"), Some(Color32::from_rgb(0, 255, 0)));
        assert_eq!(
            hex_to_color32("#0000ff80"),
            Some(Color32::from_rgba_unmultiplied(0, 0, 255, 128))
        );
        assert_eq!(hex_to_color32("#12345"), None);
        assert_eq!(hex_to_color32("#zzzzzz"), None);
        assert_eq!(hex_to_color32("rgb(1,2,3)"), None);
    }

    #[test]
    fn test_hex_round_trip() {
        let color = Color32::from_rgb(0x28, 0x2a, 0x36);
        assert_eq!(color32_to_hex(color), "#282a36");
    }

    #[test]
    fn test_missing_slots_use_defaults() {
        let mut flat = FlatPalette::new();
        flat.insert("colors.text".into(), "#eeeeee".into());
        flat.insert("colors.primary".into(), "not a color".into());

        let colors = ThemeColors::from_palette(&flat);
        assert_eq!(colors.text, Color32::from_rgb(0xee, 0xee, 0xee));
        assert_eq!(Some(colors.primary), hex_to_color32("#0078d4"));
        assert_eq!(Some(colors.background), hex_to_color32("#f5f5f5"));
        assert!(!colors.is_dark());
    }

    #[test]
    fn test_apply_sets_text_override() {
        let mut flat = FlatPalette::new();
        flat.insert("colors.background".into(), "#111111".into());
        flat.insert("colors.text".into(), "#eeeeee".into());

        let colors = ThemeColors::from_palette(&flat);
        assert!(colors.is_dark());
        let visuals = colors.visuals();
        assert!(visuals.dark_mode);
        assert_eq!(visuals.override_text_color, Some(colors.text));
        assert_eq!(visuals.panel_fill, colors.background);
    }

    #[test]
    fn test_color_slots_with_defaults_keeps_extras() {
        let mut overrides = Map::new();
        overrides.insert("text".into(), Value::String("#101010".into()));
        overrides.insert("accent".into(), Value::String("#ff00ff".into()));

        let colors = color_slots_with_defaults(&overrides);
        assert_eq!(colors.len(), 13);
        assert_eq!(colors["text"], "#101010");
        assert_eq!(colors["background"], "#f5f5f5");
        assert_eq!(colors["accent"], "#ff00ff");
    }
}
