//! Locale files and the translation context.
//!
//! A language is either a single `<code>.json` file or a `<code>/` directory
//! of JSON files in the locales directory. Documents may be flat or nested;
//! nested keys are joined with `.` the same way palettes are flattened.
//!
//! [`TranslationContext::translate`] never fails: a key missing from the
//! current language is looked up in the fallback language, then replaced by
//! the caller's default, then shown as the key itself.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Error, ResourceKind, Result};
use crate::notify::{ChangeNotifier, Subscription};
use crate::palette::{flatten, has_json_extension, JSON_EXTENSION};

/// Key → translated string mapping for one language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Locale {
    code: String,
    entries: BTreeMap<String, String>,
}

impl Locale {
    pub fn new(code: impl Into<String>, entries: BTreeMap<String, String>) -> Self {
        Self {
            code: code.into(),
            entries,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads locale files from one locales directory.
#[derive(Debug, Clone)]
pub struct LocaleStore {
    dir: PathBuf,
}

impl LocaleStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Language codes with a `<code>.json` file or a `<code>/` directory holding JSON.
    pub fn discover(&self) -> BTreeSet<String> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(dir = %self.dir.display(), %err, "locales directory not readable");
                return BTreeSet::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter_map(|path| {
                let is_language = if path.is_dir() {
                    !json_files_in(&path).is_empty()
                } else {
                    path.is_file() && has_json_extension(&path)
                };
                if !is_language {
                    return None;
                }
                let stem = if path.is_dir() {
                    path.file_name()
                } else {
                    path.file_stem()
                };
                stem.and_then(|s| s.to_str()).map(str::to_owned)
            })
            .collect()
    }

    /// Loads one language. A `<code>.json` file wins over a `<code>/` directory;
    /// files in a directory are merged in name order.
    pub fn load(&self, code: &str) -> Result<Locale> {
        Error::check_name(ResourceKind::Language, code)?;
        let file = self.file_path(code);
        if file.is_file() {
            let entries = read_locale_file(&file, code)?;
            return Ok(Locale::new(code, entries));
        }

        let dir = self.dir.join(code);
        let files = json_files_in(&dir);
        if files.is_empty() {
            return Err(Error::not_found(ResourceKind::Language, code));
        }

        let mut entries = BTreeMap::new();
        for path in files {
            entries.extend(read_locale_file(&path, code)?);
        }
        Ok(Locale::new(code, entries))
    }

    fn file_path(&self, code: &str) -> PathBuf {
        self.dir.join(format!("{code}.{JSON_EXTENSION}"))
    }
}

fn json_files_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_json_extension(path))
        .collect();
    files.sort();
    files
}

fn read_locale_file(path: &Path, code: &str) -> Result<BTreeMap<String, String>> {
    let text = fs::read_to_string(path)
        .map_err(|source| Error::io(ResourceKind::Language, code, path.to_path_buf(), source))?;
    let value: Value = serde_json::from_str(&text).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(flatten(&map)),
        _ => Err(Error::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Selection state of a [`TranslationContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageState {
    /// The language chosen at construction; nothing selected explicitly yet.
    Default(String),
    Active(String),
}

impl LanguageState {
    pub fn code(&self) -> &str {
        match self {
            LanguageState::Default(code) | LanguageState::Active(code) => code,
        }
    }
}

/// Key prefixes for the common translation groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Ui,
    Messages,
    Errors,
    Dialogs,
    Common,
}

impl Scope {
    pub fn prefix(self) -> &'static str {
        match self {
            Scope::Ui => "ui",
            Scope::Messages => "messages",
            Scope::Errors => "errors",
            Scope::Dialogs => "dialogs",
            Scope::Common => "common",
        }
    }
}

pub struct TranslationContext {
    store: LocaleStore,
    state: LanguageState,
    current: Locale,
    fallback_code: String,
    fallback: Option<Locale>,
    notifier: ChangeNotifier,
}

impl std::fmt::Debug for TranslationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationContext")
            .field("locales_dir", &self.store.dir())
            .field("state", &self.state)
            .field("fallback", &self.fallback_code)
            .finish_non_exhaustive()
    }
}

impl TranslationContext {
    /// Creates a context starting in `default_language`.
    ///
    /// Both the default and the fallback language are loaded eagerly. Either
    /// may be missing: lookups then simply fall through to the next tier.
    pub fn new(
        locales_dir: impl Into<PathBuf>,
        default_language: &str,
        fallback_language: &str,
    ) -> Self {
        let store = LocaleStore::new(locales_dir);

        let fallback = store
            .load(fallback_language)
            .inspect_err(|err| warn!(language = fallback_language, %err, "fallback locale unavailable"))
            .ok();

        let current = if default_language == fallback_language {
            fallback.clone()
        } else {
            store
                .load(default_language)
                .inspect_err(|err| warn!(language = default_language, %err, "default locale unavailable"))
                .ok()
        }
        .unwrap_or_else(|| Locale::new(default_language, BTreeMap::new()));

        info!(
            language = default_language,
            fallback = fallback_language,
            keys = current.len(),
            "translation context ready"
        );

        Self {
            store,
            state: LanguageState::Default(default_language.to_string()),
            current,
            fallback_code: fallback_language.to_string(),
            fallback,
            notifier: ChangeNotifier::new(),
        }
    }

    // ===== Queries =====

    pub fn state(&self) -> &LanguageState {
        &self.state
    }

    pub fn current_language(&self) -> &str {
        self.state.code()
    }

    pub fn fallback_language(&self) -> &str {
        &self.fallback_code
    }

    /// Re-scans the locales directory.
    pub fn available_languages(&self) -> Vec<String> {
        self.store.discover().into_iter().collect()
    }

    /// Human-readable name for a language code.
    pub fn language_name(code: &str) -> &str {
        match code {
            "en" => "English",
            "pl" => "Polski",
            "de" => "Deutsch",
            other => other,
        }
    }

    /// Best match for the process locale among the available languages.
    ///
    /// Reads `LC_ALL`, `LC_MESSAGES` then `LANG`; `pl_PL.UTF-8` maps to `pl`.
    /// `None` when no variable names an available language.
    pub fn system_language(&self) -> Option<String> {
        let values = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok());
        self.match_system_locale(values)
    }

    fn match_system_locale(&self, values: impl IntoIterator<Item = String>) -> Option<String> {
        let available = self.store.discover();
        values
            .into_iter()
            .filter_map(|value| language_from_posix_locale(&value))
            .find(|code| available.contains(code))
    }

    /// Translates `key`, falling back to the fallback language, then `default`, then `key`.
    pub fn translate(&self, key: &str, default: Option<&str>) -> String {
        let default = default.filter(|d| !d.is_empty());
        if key.is_empty() {
            return default.unwrap_or_default().to_string();
        }
        self.lookup(key)
            .or(default)
            .unwrap_or(key)
            .to_string()
    }

    /// Picks `<key>_singular` for a count of one and `<key>_plural` for anything else.
    ///
    /// Zero is treated as plural. Unresolved keys fall back to `default`, then
    /// to the base `key`.
    pub fn translate_plural(&self, key: &str, count: i64, default: Option<&str>) -> String {
        let suffix = if count == 1 { "singular" } else { "plural" };
        let derived = format!("{key}_{suffix}");
        let default = default.filter(|d| !d.is_empty()).unwrap_or(key);
        self.translate(&derived, Some(default))
    }

    /// Translates `<scope>.<key>`.
    pub fn translate_scoped(&self, scope: Scope, key: &str, default: Option<&str>) -> String {
        self.translate(&format!("{}.{}", scope.prefix(), key), default)
    }

    pub fn subscribe(&mut self) -> Subscription {
        self.notifier.subscribe()
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        if let Some(value) = self.current.get(key) {
            return Some(value);
        }
        if self.current_language() == self.fallback_code {
            return None;
        }
        self.fallback.as_ref().and_then(|locale| locale.get(key))
    }

    // ===== Mutations =====

    /// Switches to `code`, replacing the in-memory mapping wholesale.
    ///
    /// When the language is not available or fails to load, the previous
    /// language stays active and no notification is sent.
    pub fn select_language(&mut self, code: &str) -> Result<()> {
        if !self.store.discover().contains(code) {
            warn!(language = code, "language not available");
            return Err(Error::not_found(ResourceKind::Language, code));
        }

        let locale = self.store.load(code).inspect_err(|err| {
            warn!(language = code, %err, "failed to load locale");
        })?;

        self.current = locale;
        self.state = LanguageState::Active(code.to_string());
        info!(language = code, keys = self.current.len(), "language changed");
        self.notifier.notify();
        Ok(())
    }

}

fn language_from_posix_locale(value: &str) -> Option<String> {
    let code = value
        .split(['.', '@'])
        .next()?
        .split(['_', '-'])
        .next()?
        .to_ascii_lowercase();
    if code.is_empty() || code == "c" || code == "posix" {
        None
    } else {
        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("en.json"),
            r#"{"ok":"OK","cancel":"Cancel","items_singular":"item","items_plural":"items","ui":{"title":"Counter"}}"#,
        )
        .unwrap();
        fs::create_dir(dir.path().join("pl")).unwrap();
        fs::write(dir.path().join("pl").join("a.json"), r#"{"ok":"Dobrze"}"#).unwrap();
        fs::write(dir.path().join("pl").join("b.json"), r#"{"items_plural":"elementy"}"#).unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        dir
    }

    #[test]
    fn test_discover_files_and_directories() {
        let dir = locales_dir();
        let store = LocaleStore::new(dir.path());
        let langs: Vec<_> = store.discover().into_iter().collect();
        assert_eq!(langs, vec!["en", "pl"]);
    }

    #[test]
    fn test_directory_locale_merges_files() {
        let dir = locales_dir();
        let locale = LocaleStore::new(dir.path()).load("pl").unwrap();
        assert_eq!(locale.get("ok"), Some("Dobrze"));
        assert_eq!(locale.get("items_plural"), Some("elementy"));
    }

    #[test]
    fn test_three_tier_lookup() {
        let dir = locales_dir();
        let mut ctx = TranslationContext::new(dir.path(), "en", "en");
        ctx.select_language("pl").unwrap();

        assert_eq!(ctx.translate("ok", None), "Dobrze");
        assert_eq!(ctx.translate("cancel", None), "Cancel");
        assert_eq!(ctx.translate("missing", Some("Default")), "Default");
        assert_eq!(ctx.translate("missing", None), "missing");
        assert_eq!(ctx.translate("missing", Some("")), "missing");
        assert_eq!(ctx.translate("", Some("x")), "x");
        assert_eq!(ctx.translate("", None), "");
    }

    #[test]
    fn test_nested_keys_are_flattened() {
        let dir = locales_dir();
        let ctx = TranslationContext::new(dir.path(), "en", "en");
        assert_eq!(ctx.translate("ui.title", None), "Counter");
        assert_eq!(ctx.translate_scoped(Scope::Ui, "title", None), "Counter");
        assert_eq!(ctx.translate_scoped(Scope::Errors, "nope", None), "errors.nope");
    }

    #[test]
    fn test_plural_forms() {
        let dir = locales_dir();
        let mut ctx = TranslationContext::new(dir.path(), "en", "en");

        assert_eq!(ctx.translate_plural("items", 1, None), "item");
        assert_eq!(ctx.translate_plural("items", 2, None), "items");
        assert_eq!(ctx.translate_plural("items", 0, None), "items");
        assert_eq!(ctx.translate_plural("things", 3, None), "things");
        assert_eq!(ctx.translate_plural("things", 1, Some("a thing")), "a thing");

        ctx.select_language("pl").unwrap();
        assert_eq!(ctx.translate_plural("items", 5, None), "elementy");
        assert_eq!(ctx.translate_plural("items", 1, None), "item");
    }

    #[test]
    fn test_unknown_language_keeps_previous() {
        let dir = locales_dir();
        let mut ctx = TranslationContext::new(dir.path(), "en", "en");
        let sub = ctx.subscribe();

        assert!(ctx.select_language("xx").unwrap_err().is_not_found());
        assert!(ctx.select_language("empty").unwrap_err().is_not_found());
        assert_eq!(ctx.current_language(), "en");
        assert_eq!(ctx.state(), &LanguageState::Default("en".into()));
        assert!(!sub.take_changed());

        ctx.select_language("pl").unwrap();
        assert_eq!(ctx.state(), &LanguageState::Active("pl".into()));
        assert!(sub.take_changed());
    }

    #[test]
    fn test_broken_locale_keeps_previous() {
        let dir = locales_dir();
        fs::write(dir.path().join("de.json"), "[not, json").unwrap();
        let mut ctx = TranslationContext::new(dir.path(), "en", "en");

        assert!(matches!(ctx.select_language("de"), Err(Error::Parse { .. })));
        assert_eq!(ctx.current_language(), "en");
        assert_eq!(ctx.translate("ok", None), "OK");
    }

    #[test]
    fn test_missing_default_language_still_translates_keys() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = TranslationContext::new(dir.path(), "en", "en");
        assert_eq!(ctx.translate("hello", None), "hello");
        assert!(ctx.available_languages().is_empty());
    }

    #[test]
    fn test_upper_case_locale_file_is_not_a_language() {
        let dir = locales_dir();
        fs::write(dir.path().join("de.JSON"), r#"{"ok":"Gut"}"#).unwrap();
        fs::create_dir(dir.path().join("fr")).unwrap();
        fs::write(dir.path().join("fr").join("a.JSON"), r#"{"ok":"Bien"}"#).unwrap();
        let mut ctx = TranslationContext::new(dir.path(), "en", "en");

        assert_eq!(ctx.available_languages(), vec!["en", "pl"]);
        assert!(ctx.select_language("de").unwrap_err().is_not_found());
        for code in ctx.available_languages() {
            ctx.select_language(&code).unwrap();
        }
    }

    #[test]
    fn test_language_code_cannot_leave_locales_dir() {
        let root = tempfile::tempdir().unwrap();
        let locales = root.path().join("locales");
        fs::create_dir(&locales).unwrap();
        fs::write(root.path().join("secret.json"), r#"{"ok":"leak"}"#).unwrap();
        let store = LocaleStore::new(&locales);

        assert!(matches!(store.load("../secret"), Err(Error::InvalidName { .. })));
        assert!(matches!(store.load(""), Err(Error::InvalidName { .. })));
    }

    #[test]
    fn test_system_locale_matches_available_languages() {
        let dir = locales_dir();
        let ctx = TranslationContext::new(dir.path(), "en", "en");

        let pick = |values: &[&str]| ctx.match_system_locale(values.iter().map(|v| v.to_string()));
        assert_eq!(pick(&["pl_PL.UTF-8"]).as_deref(), Some("pl"));
        assert_eq!(pick(&["de_DE.UTF-8", "en_US"]).as_deref(), Some("en"));
        assert_eq!(pick(&["C.UTF-8", "fr_FR"]), None);
        assert_eq!(pick(&[]), None);
    }

    #[test]
    fn test_language_names_and_posix_parsing() {
        assert_eq!(TranslationContext::language_name("pl"), "Polski");
        assert_eq!(TranslationContext::language_name("xx"), "xx");
        assert_eq!(language_from_posix_locale("pl_PL.UTF-8").as_deref(), Some("pl"));
        assert_eq!(language_from_posix_locale("en-US").as_deref(), Some("en"));
        assert_eq!(language_from_posix_locale("C.UTF-8"), None);
        assert_eq!(language_from_posix_locale(""), None);
    }
}
