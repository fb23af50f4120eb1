//! Application-level coordination.
//!
//! Turns panel interactions into calls on the contexts and view models, and
//! converts failures into the error message shown in the status bar.

use std::path::Path;

use rmvvm::models::CounterModel;
use tracing::{info, warn};

use crate::app::{AppState, Preferences};
use crate::state::{ActiveView, ShapeKind};
use crate::view_models::CounterViewModel;

pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Restores persisted preferences on top of the configured defaults.
    ///
    /// Without a stored language the process locale is tried. Stale entries
    /// (a deleted theme, an out-of-range counter) are logged and skipped.
    pub fn restore_preferences(state: &mut AppState, prefs: &Preferences) {
        let system_language = state.context.translations.system_language();
        Self::restore_preferences_with(state, prefs, system_language);
    }

    fn restore_preferences_with(
        state: &mut AppState,
        prefs: &Preferences,
        system_language: Option<String>,
    ) {
        if let Some(theme) = &prefs.theme {
            if state.context.themes.current_theme() != Some(theme.as_str()) {
                if let Err(err) = state.context.themes.select_theme(theme) {
                    warn!(theme = %theme, %err, "stored theme not restored");
                }
            }
        }
        match (&prefs.language, system_language) {
            (Some(language), _) => {
                if let Err(err) = state.context.translations.select_language(language) {
                    warn!(language = %language, %err, "stored language not restored");
                }
            }
            (None, Some(language)) if language != state.context.translations.current_language() => {
                info!(language = %language, "using the system language");
                if let Err(err) = state.context.translations.select_language(&language) {
                    warn!(language = %language, %err, "system language not applied");
                }
            }
            (None, _) => {}
        }
        state.navigation.navigate(prefs.last_view);

        match CounterModel::with_count(prefs.counter) {
            Ok(model) => state.counter = CounterViewModel::new(model),
            Err(err) => warn!(%err, "stored counter not restored"),
        }
        state.theme_editor.load_from_current(&state.context.themes);
    }

    /// Snapshot of what should survive a restart.
    pub fn preferences(state: &AppState) -> Preferences {
        Preferences {
            theme: state.context.themes.current_theme().map(str::to_string),
            language: Some(state.context.translations.current_language().to_string()),
            last_view: state.navigation.current(),
            counter: state.counter.count(),
        }
    }

    /// Drains background work. Called once per frame.
    pub fn poll_background(state: &mut AppState) {
        state.counter.poll();
        state.caches.sync();
    }

    pub fn select_theme(state: &mut AppState, name: &str) {
        match state.context.themes.select_theme(name) {
            Ok(()) => {
                state.error_message = None;
                state.theme_editor.load_from_current(&state.context.themes);
            }
            Err(err) => {
                let prefix = state.tr_error("theme_not_applied", "Theme could not be applied");
                state.error_message = Some(format!("{prefix}: {err}"));
            }
        }
    }

    pub fn select_language(state: &mut AppState, code: &str) {
        match state.context.translations.select_language(code) {
            Ok(()) => state.error_message = None,
            Err(err) => {
                let prefix = state.tr_error("language_not_applied", "Language could not be applied");
                state.error_message = Some(format!("{prefix}: {err}"));
            }
        }
    }

    pub fn navigate(state: &mut AppState, view: ActiveView) {
        if state.navigation.navigate(view) {
            info!(?view, "navigated");
        }
    }

    // ===== Counter =====

    pub fn increment_counter(state: &mut AppState, ctx: &egui::Context) {
        if !state.counter.request_increment(Some(ctx.clone())) {
            warn!("increment already in progress");
        }
    }

    pub fn decrement_counter(state: &mut AppState) {
        state.counter.decrement();
    }

    pub fn reset_counter(state: &mut AppState) {
        state.counter.reset();
    }

    // ===== Fuzzy sets =====

    /// Creates a set from the form fields and selects it.
    pub fn create_fuzzy_set(state: &mut AppState) {
        let form = &state.fuzzy_form;
        let [a, b, c, d] = form.params;
        let id = match form.shape {
            ShapeKind::Triangular => state.fuzzy.create_triangular(&form.name, a, b, c, form.universe),
            ShapeKind::Trapezoidal => {
                state.fuzzy.create_trapezoidal(&form.name, a, b, c, d, form.universe)
            }
            ShapeKind::Gaussian => {
                state
                    .fuzzy
                    .create_gaussian(&form.name, form.center, form.sigma, form.universe)
            }
        };
        state.fuzzy.select(&id);
        state.fuzzy_form.clear_name();
        Self::sync_fuzzy_system(state);
    }

    pub fn remove_fuzzy_set(state: &mut AppState, id: &str) {
        state.fuzzy.remove(id);
        Self::sync_fuzzy_system(state);
    }

    pub fn select_fuzzy_set(state: &mut AppState, id: &str) {
        state.fuzzy.select(id);
    }

    // ===== Rules and fuzzy systems =====

    pub fn create_fuzzy_system(state: &mut AppState) {
        let form = &state.system_form;
        if state.system.create_new_system(&form.name, &form.description) {
            state.system_form.inputs.clear();
            Self::sync_fuzzy_system(state);
        }
    }

    pub fn add_input_variable(state: &mut AppState) {
        if state.system.add_input_variable(&state.system_form.new_input) {
            state.system_form.new_input.clear();
            Self::sync_fuzzy_system(state);
        }
    }

    pub fn add_output_variable(state: &mut AppState) {
        if state.system.add_output_variable(&state.system_form.new_output) {
            state.system_form.new_output.clear();
            Self::sync_fuzzy_system(state);
        }
    }

    /// Creates a rule from the form and selects it.
    pub fn create_rule(state: &mut AppState) {
        let form = &state.rule_form;
        let id = state.rules.create_rule(
            &form.name,
            form.antecedent.clone(),
            form.consequent.clone(),
            form.operator,
        );
        state.rules.select_rule(&id);
        state.rule_form.clear();
        Self::sync_fuzzy_system(state);
    }

    /// Writes the form back into the selected rule.
    pub fn update_selected_rule(state: &mut AppState) {
        let Some(id) = state.rules.selected().map(|rule| rule.id.clone()) else {
            return;
        };
        let form = &state.rule_form;
        state.rules.update_rule(
            &id,
            &form.name,
            form.antecedent.clone(),
            form.consequent.clone(),
            form.operator,
        );
        Self::sync_fuzzy_system(state);
    }

    /// Selects a rule and copies it into the form.
    pub fn select_rule(state: &mut AppState, id: &str) {
        state.rules.select_rule(id);
        if let Some(rule) = state.rules.selected() {
            state.rule_form.load(rule);
        }
    }

    pub fn remove_rule(state: &mut AppState, id: &str) {
        state.rules.remove_rule(id);
        Self::sync_fuzzy_system(state);
    }

    pub fn evaluate_fuzzy_system(state: &mut AppState) {
        state.system.evaluate(&state.system_form.inputs);
    }

    pub fn save_fuzzy_system(state: &mut AppState) {
        state.system.save();
    }

    /// Loads a saved system and hands its sets and rules to their editors.
    pub fn load_fuzzy_system(state: &mut AppState, name: &str) {
        let Some(system) = state.system.load(name) else {
            return;
        };
        state.system_form.name = system.name.clone();
        state.system_form.description = system.description.clone();
        state.system_form.inputs.clear();
        state.rule_form.clear();
        state.fuzzy.replace_sets(system.fuzzy_sets);
        state.rules.replace_rules(system.rules);
        Self::sync_fuzzy_system(state);
    }

    pub fn refresh_saved_systems(state: &mut AppState) {
        state.system.refresh_saved();
    }

    /// Pushes the edited sets and rules into the system, and the system's
    /// variables and set ids back into the rule editor.
    fn sync_fuzzy_system(state: &mut AppState) {
        let set_ids = state.fuzzy.sets().iter().map(|set| set.id.clone()).collect();
        state.rules.set_available_fuzzy_sets(set_ids);
        let (inputs, outputs) = state
            .system
            .system()
            .map(|system| (system.input_variables.clone(), system.output_variables.clone()))
            .unwrap_or_default();
        state.rules.set_available_variables(inputs, outputs);
        state.system.sync(state.fuzzy.sets(), state.rules.rules());
    }

    // ===== Themes =====

    /// Applies a theme from the theme view; failures are shown in the view.
    pub fn apply_theme(state: &mut AppState, name: &str) {
        if state.theme_editor.apply(&mut state.context.themes, name) {
            state.theme_editor.load_from_current(&state.context.themes);
        }
    }

    pub fn create_theme(state: &mut AppState) {
        state.theme_editor.create(&mut state.context.themes);
    }

    pub fn delete_theme(state: &mut AppState, name: &str) {
        state.theme_editor.delete(&mut state.context.themes, name);
    }

    pub fn import_theme(state: &mut AppState, path: &Path) {
        state.theme_editor.import(&mut state.context.themes, path);
    }

    pub fn refresh_themes(state: &mut AppState) {
        let count = state.context.themes.refresh().len();
        info!(count, "themes re-discovered");
    }

    pub fn load_editor_from_current(state: &mut AppState) {
        state.theme_editor.load_from_current(&state.context.themes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rmvvm::models::Condition;
    use rmvvm::{AppConfig, AppContext};
    use std::fs;

    fn app_state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let themes = dir.path().join("assets/themes");
        let locales = dir.path().join("assets/locales");
        fs::create_dir_all(&themes).unwrap();
        fs::create_dir_all(&locales).unwrap();
        fs::write(themes.join("light.json"), r##"{"colors":{"background":"#fafafa"}}"##).unwrap();
        fs::write(themes.join("dark.json"), r##"{"colors":{"background":"#101010"}}"##).unwrap();
        fs::write(locales.join("en.json"), r#"{"errors":{"theme_not_applied":"Theme failed","language_not_applied":"Language unavailable"}}"#).unwrap();
        fs::write(locales.join("pl.json"), r#"{"errors":{"theme_not_applied":"Błąd motywu"}}"#).unwrap();
        let config = AppConfig::from_toml_str("", dir.path()).unwrap();
        (dir, AppState::new(AppContext::new(config)))
    }

    #[test]
    fn test_failed_theme_selection_sets_translated_error() {
        let (_dir, mut state) = app_state();
        ApplicationCoordinator::select_language(&mut state, "pl");

        ApplicationCoordinator::select_theme(&mut state, "neon");

        let message = state.error_message.clone().unwrap();
        assert!(message.starts_with("Błąd motywu: "));
        assert_eq!(state.context.themes.current_theme(), Some("light"));

        ApplicationCoordinator::select_theme(&mut state, "dark");
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn test_preferences_round_trip_through_state() {
        let (_dir, mut state) = app_state();
        let prefs = Preferences {
            theme: Some("dark".to_string()),
            language: Some("pl".to_string()),
            last_view: ActiveView::FuzzySets,
            counter: 4,
        };

        ApplicationCoordinator::restore_preferences(&mut state, &prefs);

        assert_eq!(ApplicationCoordinator::preferences(&state), prefs);
    }

    #[test]
    fn test_stale_preferences_are_skipped() {
        let (_dir, mut state) = app_state();
        let prefs = Preferences {
            theme: Some("deleted".to_string()),
            language: Some("xx".to_string()),
            last_view: ActiveView::Themes,
            counter: 99,
        };

        ApplicationCoordinator::restore_preferences(&mut state, &prefs);

        assert_eq!(state.context.themes.current_theme(), Some("light"));
        assert_eq!(state.context.translations.current_language(), "en");
        assert_eq!(state.navigation.current(), ActiveView::Themes);
        assert_eq!(state.counter.count(), 0);
    }

    #[test]
    fn test_system_language_used_without_stored_preference() {
        let (_dir, mut state) = app_state();
        let prefs = Preferences {
            language: None,
            ..Preferences::default()
        };

        ApplicationCoordinator::restore_preferences_with(&mut state, &prefs, Some("pl".to_string()));
        assert_eq!(state.context.translations.current_language(), "pl");

        let stored = Preferences {
            language: Some("en".to_string()),
            ..Preferences::default()
        };
        ApplicationCoordinator::restore_preferences_with(&mut state, &stored, Some("pl".to_string()));
        assert_eq!(state.context.translations.current_language(), "en");
    }

    #[test]
    fn test_no_system_language_keeps_configured_default() {
        let (_dir, mut state) = app_state();
        let sub = state.context.translations.subscribe();

        ApplicationCoordinator::restore_preferences_with(&mut state, &Preferences::default(), None);

        assert_eq!(state.context.translations.current_language(), "en");
        assert!(!sub.take_changed());
    }

    #[test]
    fn test_language_error_uses_errors_scope() {
        let (_dir, mut state) = app_state();

        ApplicationCoordinator::select_language(&mut state, "xx");

        let message = state.error_message.clone().unwrap();
        assert!(message.starts_with("Language unavailable: "));
    }

    #[test]
    fn test_rules_follow_sets_and_system_variables() {
        let (_dir, mut state) = app_state();
        state.system_form.name = "Heater".to_string();
        ApplicationCoordinator::create_fuzzy_system(&mut state);
        state.system_form.new_input = "temperature".to_string();
        ApplicationCoordinator::add_input_variable(&mut state);
        state.system_form.new_output = "heating".to_string();
        ApplicationCoordinator::add_output_variable(&mut state);

        state.fuzzy_form.name = "cold".to_string();
        ApplicationCoordinator::create_fuzzy_set(&mut state);
        let set_id = state.fuzzy.sets()[0].id.clone();

        state.rule_form.name = "warm up".to_string();
        state.rule_form.antecedent = vec![Condition::new("temperature", set_id.clone())];
        state.rule_form.consequent = Condition::new("heating", set_id.clone());
        ApplicationCoordinator::create_rule(&mut state);

        assert!(state.rules.validation_errors().is_empty());
        assert!(state.system.validation_errors().is_empty());
        assert!(state.rule_form.name.is_empty());

        ApplicationCoordinator::remove_fuzzy_set(&mut state, &set_id);
        assert_eq!(state.rules.validation_errors().len(), 2);
        assert!(!state.system.validation_errors().is_empty());
    }

    #[test]
    fn test_saved_system_reloads_into_editors() {
        let (_dir, mut state) = app_state();
        state.system_form.name = "Fan".to_string();
        ApplicationCoordinator::create_fuzzy_system(&mut state);
        state.system_form.new_input = "speed".to_string();
        ApplicationCoordinator::add_input_variable(&mut state);
        ApplicationCoordinator::create_fuzzy_set(&mut state);
        ApplicationCoordinator::create_rule(&mut state);
        ApplicationCoordinator::save_fuzzy_system(&mut state);

        let set_id = state.fuzzy.sets()[0].id.clone();
        state.fuzzy.remove(&set_id);
        state.system_form.name = "Other".to_string();
        ApplicationCoordinator::create_fuzzy_system(&mut state);

        ApplicationCoordinator::load_fuzzy_system(&mut state, "fan");
        assert_eq!(state.system_form.name, "Fan");
        assert_eq!(state.fuzzy.sets().len(), 1);
        assert_eq!(state.rules.rules().len(), 1);
        assert_eq!(state.system.system().unwrap().input_variables, vec!["speed"]);
    }

    #[test]
    fn test_create_fuzzy_set_from_form() {
        let (_dir, mut state) = app_state();
        state.fuzzy_form.name = "warm".to_string();
        state.fuzzy_form.shape = ShapeKind::Gaussian;

        ApplicationCoordinator::create_fuzzy_set(&mut state);

        let selected = state.fuzzy.selected().unwrap();
        assert_eq!(selected.name, "warm");
        assert_eq!(selected.function.kind(), "gaussian");
        assert!(state.fuzzy_form.name.is_empty());
    }
}
