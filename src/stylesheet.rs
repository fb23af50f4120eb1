//! Stylesheet template resolution.
//!
//! Templates carry `{dotted.key}` placeholders. [`resolve`] swaps each
//! placeholder whose key is in the palette for its value and leaves every
//! other brace sequence alone, so a partially specified palette still yields
//! a usable stylesheet.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::palette::FlatPalette;

/// Replaces every `{key}` present in `palette` with its value.
///
/// The template is scanned once from left to right and substituted text is
/// not scanned again. Resolving the output a second time can therefore still
/// substitute a value that happens to contain `{key}` text.
pub fn resolve(template: &str, palette: &FlatPalette) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let replacement = after_open
            .find('}')
            .and_then(|close| palette.get(&after_open[..close]).map(|value| (close, value)));

        match replacement {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after_open[close + 1..];
            }
            None => {
                out.push('{');
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Finds a template file, preferring `base_dir/path` for relative paths.
pub fn locate_template(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_relative() {
        let candidate = base_dir.join(path);
        if candidate.exists() {
            return candidate;
        }
    }
    path.to_path_buf()
}

/// Reads a template, returning `None` (and logging) when it cannot be read.
pub fn read_template(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) => {
            warn!(path = %path.display(), %err, "stylesheet template not readable");
            None
        }
    }
}

/// Reads a template and resolves it; a missing template yields an empty stylesheet.
pub fn load_stylesheet(path: &Path, base_dir: &Path, palette: &FlatPalette) -> String {
    let path = locate_template(path, base_dir);
    read_template(&path)
        .map(|template| resolve(&template, palette))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn palette(entries: &[(&str, &str)]) -> FlatPalette {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_css_like_template() {
        let flat = palette(&[("colors.background", "#111111"), ("colors.text", "#eeeeee")]);
        let template = "QWidget { background: {colors.background}; color: {colors.text}; }";

        assert_eq!(
            resolve(template, &flat),
            "QWidget { background: #111111; color: #eeeeee; }"
        );
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        let flat = palette(&[("colors.text", "#000")]);
        let template = "a {colors.text} b {colors.missing} c";

        assert_eq!(resolve(template, &flat), "a #000 b {colors.missing} c");
    }

    #[test]
    fn test_unbalanced_braces_are_kept() {
        let flat = palette(&[("x", "1")]);
        assert_eq!(resolve("{x} { {x", &flat), "1 { {x");
        assert_eq!(resolve("}{x}}", &flat), "}1}");
        assert_eq!(resolve("{}", &flat), "{}");
    }

    #[test]
    fn test_resolved_output_is_not_rescanned() {
        let flat = palette(&[("a", "{b}"), ("b", "#fff")]);

        let once = resolve("{a}", &flat);
        assert_eq!(once, "{b}");
        assert_eq!(resolve(&once, &flat), "#fff");
    }

    #[test]
    fn test_resolve_is_stable_once_tokens_are_gone() {
        let flat = palette(&[("colors.text", "#123456")]);
        let once = resolve("color: {colors.text};", &flat);
        assert_eq!(resolve(&once, &flat), once);
    }

    #[test]
    fn test_multibyte_text_around_tokens() {
        let flat = palette(&[("k", "✓")]);
        assert_eq!(resolve("ünïcode {k} ☃", &flat), "ünïcode ✓ ☃");
    }

    #[test]
    fn test_missing_template_yields_empty_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let css = load_stylesheet(Path::new("absent.style"), dir.path(), &FlatPalette::new());
        assert!(css.is_empty());
    }

    #[test]
    fn test_relative_template_found_in_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.style"), "fg: {colors.text};").unwrap();
        let flat = palette(&[("colors.text", "#abcdef")]);

        let css = load_stylesheet(Path::new("main.style"), dir.path(), &flat);
        assert_eq!(css, "fg: #abcdef;");
    }
}
