//! The explicitly constructed holder of the application's shared services.
//!
//! `main` builds one [`AppContext`] and lends it to view models and
//! coordinators; nothing in the crate reaches for a global theme or
//! translation manager.

use tracing::warn;

use crate::config::AppConfig;
use crate::i18n::TranslationContext;
use crate::theme::ThemeContext;

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub themes: ThemeContext,
    pub translations: TranslationContext,
}

impl AppContext {
    /// Builds the contexts from `config` and activates the configured default theme.
    ///
    /// A default theme that cannot be applied is logged and the context stays
    /// unthemed.
    pub fn new(config: AppConfig) -> Self {
        let mut themes = ThemeContext::new(config.themes_dir());
        if let Err(err) = themes.select_theme(&config.defaults.theme) {
            warn!(theme = %config.defaults.theme, %err, "default theme not applied");
        }

        let translations = TranslationContext::new(
            config.locales_dir(),
            &config.defaults.language,
            &config.defaults.fallback_language,
        );

        Self {
            config,
            themes,
            translations,
        }
    }

    /// Resolves the configured stylesheet template against the active palette.
    pub fn stylesheet(&self) -> String {
        self.themes.load_stylesheet(self.config.stylesheet())
    }
}
