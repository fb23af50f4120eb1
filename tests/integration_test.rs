use anyhow::Result;
use pretty_assertions::assert_eq;
use rmvvm::models::{
    Condition, FuzzyRule, FuzzySet, FuzzySystem, MembershipFunction, RuleOperator, Universe,
};
use rmvvm::{
    resolve, AppConfig, AppContext, Error, FlatPalette, FuzzySystemStore, ThemeContext,
    TranslationContext,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

fn write(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    Ok(())
}

/// A config directory laid out like the shipped `assets/`.
fn app_dir() -> Result<tempfile::TempDir> {
    let dir = tempfile::tempdir()?;
    let root = dir.path();
    write(
        &root.join("assets/themes/dark.json"),
        r##"{"colors":{"background":"#111111","text":"#eeeeee"}}"##,
    )?;
    write(
        &root.join("assets/themes/light.json"),
        r##"{"colors":{"background":"#fafafa","text":"#222222"}}"##,
    )?;
    write(
        &root.join("assets/themes/main.style"),
        "QWidget { background: {colors.background}; color: {colors.text}; }",
    )?;
    write(
        &root.join("assets/locales/en.json"),
        r#"{"ok":"OK","items_singular":"item","items_plural":"items","ui":{"only_en":"English only"}}"#,
    )?;
    write(&root.join("assets/locales/pl/a.json"), r#"{"ok":"Dobrze"}"#)?;
    write(&root.join("assets/locales/pl/b.json"), r#"{"items_singular":"element"}"#)?;
    write(
        &root.join("config.toml"),
        "[defaults]\ntheme = \"dark\"\nlanguage = \"en\"\nfallback_language = \"en\"\n",
    )?;
    Ok(dir)
}

#[test]
fn test_dark_theme_resolves_documented_stylesheet() -> Result<()> {
    let dir = app_dir()?;
    let config = AppConfig::load(&dir.path().join("config.toml"))?;
    let ctx = AppContext::new(config);

    assert_eq!(ctx.themes.current_theme(), Some("dark"));
    assert_eq!(
        ctx.stylesheet(),
        "QWidget { background: #111111; color: #eeeeee; }"
    );
    Ok(())
}

#[test]
fn test_every_discovered_theme_can_be_selected() -> Result<()> {
    let dir = app_dir()?;
    let mut themes = ThemeContext::new(dir.path().join("assets/themes"));

    for name in themes.available_themes() {
        themes.select_theme(&name)?;
        assert_eq!(themes.current_theme(), Some(name.as_str()));
        let stylesheet = themes.load_stylesheet("main.style");
        assert!(!stylesheet.contains("{colors."));
    }
    Ok(())
}

#[test]
fn test_unknown_theme_leaves_current() -> Result<()> {
    let dir = app_dir()?;
    let mut themes = ThemeContext::new(dir.path().join("assets/themes"));
    themes.select_theme("light")?;

    let err = themes.select_theme("solarized").unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(themes.current_theme(), Some("light"));
    Ok(())
}

#[test]
fn test_absent_tokens_pass_through() {
    let palette: FlatPalette = [("colors.text".to_string(), "#000000".to_string())]
        .into_iter()
        .collect();
    assert_eq!(
        resolve("a {colors.text} b {colors.missing} c", &palette),
        "a #000000 b {colors.missing} c"
    );
}

#[test]
fn test_translation_lookup_chain() -> Result<()> {
    let dir = app_dir()?;
    let mut tr = TranslationContext::new(dir.path().join("assets/locales"), "en", "en");

    assert_eq!(tr.translate("cancel", Some("Cancel")), "Cancel");
    assert_eq!(tr.translate("cancel", None), "cancel");

    tr.select_language("pl")?;
    assert_eq!(tr.translate("ok", None), "Dobrze");
    assert_eq!(tr.translate("ui.only_en", None), "English only");
    Ok(())
}

#[test]
fn test_plural_forms() -> Result<()> {
    let dir = app_dir()?;
    let mut tr = TranslationContext::new(dir.path().join("assets/locales"), "en", "en");

    assert_eq!(tr.translate_plural("items", 1, None), "item");
    assert_eq!(tr.translate_plural("items", 0, None), "items");
    assert_eq!(tr.translate_plural("items", 2, None), "items");

    tr.select_language("pl")?;
    assert_eq!(tr.translate_plural("items", 1, None), "element");
    // pl has no plural form, so English fills in
    assert_eq!(tr.translate_plural("items", 5, None), "items");
    Ok(())
}

#[test]
fn test_unknown_language_keeps_previous() -> Result<()> {
    let dir = app_dir()?;
    let mut tr = TranslationContext::new(dir.path().join("assets/locales"), "en", "en");
    tr.select_language("pl")?;
    let changes = tr.subscribe();

    assert!(tr.select_language("xx").is_err());

    assert_eq!(tr.current_language(), "pl");
    assert!(!changes.take_changed());
    Ok(())
}

#[test]
fn test_theme_change_reaches_subscribers() -> Result<()> {
    let dir = app_dir()?;
    let config = AppConfig::load(&dir.path().join("config.toml"))?;
    let mut ctx = AppContext::new(config);
    let first = ctx.themes.subscribe();
    let second = ctx.themes.subscribe();

    ctx.themes.select_theme("light")?;

    assert!(first.take_changed());
    assert!(second.take_changed());
    assert!(!first.take_changed());
    assert_eq!(
        ctx.stylesheet(),
        "QWidget { background: #fafafa; color: #222222; }"
    );
    Ok(())
}

#[test]
fn test_shipped_assets_are_consistent() -> Result<()> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let config = AppConfig::load(&root.join("config.toml"))?;
    let mut ctx = AppContext::new(config);

    assert_eq!(ctx.themes.current_theme(), Some("light"));
    for theme in ctx.themes.available_themes() {
        ctx.themes.select_theme(&theme)?;
        let stylesheet = ctx.stylesheet();
        assert!(!stylesheet.is_empty());
        assert!(!stylesheet.contains("{colors."), "unresolved token in {theme}");
    }

    let languages = ctx.translations.available_languages();
    assert!(languages.contains(&"en".to_string()));
    assert!(languages.contains(&"pl".to_string()));
    ctx.translations.select_language("pl")?;
    assert_eq!(ctx.translations.translate("counter.title", None), "Licznik");
    assert_eq!(ctx.translations.translate_plural("counter.clicks", 1, None), "kliknięcie");
    assert_eq!(ctx.translations.translate("nav.rules", None), "Reguły");
    Ok(())
}

#[test]
fn test_fuzzy_system_saved_under_configured_data_dir() -> Result<()> {
    let dir = app_dir()?;
    write(&dir.path().join("app.toml"), "[paths]\ndata_dir = \"systems\"\n")?;
    let config = AppConfig::load(&dir.path().join("app.toml"))?;
    let store = FuzzySystemStore::new(config.data_dir());

    let universe = Universe { min: 0.0, max: 10.0 };
    let mut system = FuzzySystem::new("sys-1", "Tip Calculator", "service quality to tip");
    system.add_input_variable("service");
    system.add_output_variable("tip");
    let poor = MembershipFunction::Triangular { a: 0.0, b: 0.0, c: 5.0 };
    let good = MembershipFunction::Triangular { a: 5.0, b: 10.0, c: 10.0 };
    system.fuzzy_sets = vec![
        FuzzySet::new("poor", "poor", poor, universe),
        FuzzySet::new("good", "good", good, universe),
    ];
    system.rules = vec![
        FuzzyRule::new(
            "rule-1",
            "poor service",
            vec![Condition::new("service", "poor")],
            Condition::new("tip", "poor"),
            RuleOperator::And,
        ),
        FuzzyRule::new(
            "rule-2",
            "good service",
            vec![Condition::new("service", "good")],
            Condition::new("tip", "good"),
            RuleOperator::And,
        ),
    ];
    assert!(system.validate().is_empty());

    let path = store.save(&system)?;
    assert_eq!(path, dir.path().join("systems").join("fuzzy_system_tip_calculator.json"));

    let loaded = store.load("tip calculator")?;
    let inputs = BTreeMap::from([("service".to_string(), 9.0)]);
    assert!(loaded.evaluate(&inputs)?["tip"] > 5.0);
    Ok(())
}
