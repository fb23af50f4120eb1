//! Centralized application state for the MVVM demo.
//!
//! The shared [`AppContext`] is owned here and lent to the view models; every
//! other field is presentation state local to one view.

use rmvvm::{AppContext, FuzzySystemStore, Scope};

use crate::state::{FuzzyFormState, NavigationState, RuleFormState, SystemFormState, ViewCache};
use crate::view_models::{
    CounterViewModel, FuzzySetsViewModel, FuzzySystemViewModel, RulesViewModel, ThemeViewModel,
};

/// One label/stylesheet cache per rendered area.
pub struct ViewCaches {
    pub header: ViewCache,
    pub navigation: ViewCache,
    pub counter: ViewCache,
    pub fuzzy: ViewCache,
    pub rules: ViewCache,
    pub themes: ViewCache,
    pub status: ViewCache,
}

impl ViewCaches {
    pub fn new(context: &mut AppContext) -> Self {
        Self {
            header: ViewCache::new(context),
            navigation: ViewCache::new(context),
            counter: ViewCache::new(context),
            fuzzy: ViewCache::new(context),
            rules: ViewCache::new(context),
            themes: ViewCache::new(context),
            status: ViewCache::new(context),
        }
    }

    /// Applies pending change signals to every cache.
    pub fn sync(&mut self) {
        for cache in [
            &mut self.header,
            &mut self.navigation,
            &mut self.counter,
            &mut self.fuzzy,
            &mut self.rules,
            &mut self.themes,
            &mut self.status,
        ] {
            cache.sync();
        }
    }
}

pub struct AppState {
    /// Theme, translation, and configuration services
    pub context: AppContext,

    pub navigation: NavigationState,

    // ===== View Models =====
    pub counter: CounterViewModel,
    pub fuzzy: FuzzySetsViewModel,
    pub rules: RulesViewModel,
    pub system: FuzzySystemViewModel,
    pub theme_editor: ThemeViewModel,

    // ===== View State =====
    pub fuzzy_form: FuzzyFormState,
    pub rule_form: RuleFormState,
    pub system_form: SystemFormState,
    pub caches: ViewCaches,

    /// Current error message to display (if any)
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new(mut context: AppContext) -> Self {
        let caches = ViewCaches::new(&mut context);
        let mut theme_editor = ThemeViewModel::new();
        theme_editor.load_from_current(&context.themes);
        let system = FuzzySystemViewModel::new(FuzzySystemStore::new(context.config.data_dir()));

        Self {
            context,
            navigation: NavigationState::default(),
            counter: CounterViewModel::default(),
            fuzzy: FuzzySetsViewModel::new(),
            rules: RulesViewModel::new(),
            system,
            theme_editor,
            fuzzy_form: FuzzyFormState::default(),
            rule_form: RuleFormState::default(),
            system_form: SystemFormState::default(),
            caches,
            error_message: None,
        }
    }

    /// Translates `errors.<key>` for messages shown in the status bar.
    pub fn tr_error(&self, key: &str, default: &str) -> String {
        self.context
            .translations
            .translate_scoped(Scope::Errors, key, Some(default))
    }
}
