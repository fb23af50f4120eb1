//! Per-view cache of translated labels and the resolved stylesheet.
//!
//! Each view owns one cache holding a theme and a language subscription.
//! On a change signal the cache is invalidated and the view recomputes what
//! it needs the next time it renders.

use std::collections::HashMap;

use rmvvm::{AppContext, Subscription, ThemeColors};

pub struct ViewCache {
    theme_changes: Subscription,
    language_changes: Subscription,
    labels: HashMap<&'static str, String>,
    stylesheet: Option<String>,
    colors: Option<ThemeColors>,
}

impl std::fmt::Debug for ViewCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewCache")
            .field("labels", &self.labels.len())
            .field("has_stylesheet", &self.stylesheet.is_some())
            .finish_non_exhaustive()
    }
}

impl ViewCache {
    /// Subscribes to both contexts.
    pub fn new(ctx: &mut AppContext) -> Self {
        Self {
            theme_changes: ctx.themes.subscribe(),
            language_changes: ctx.translations.subscribe(),
            labels: HashMap::new(),
            stylesheet: None,
            colors: None,
        }
    }

    /// Drops whatever the pending change signals invalidate.
    ///
    /// Returns true if anything was invalidated.
    pub fn sync(&mut self) -> bool {
        let theme_changed = self.theme_changes.take_changed();
        let language_changed = self.language_changes.take_changed();
        if theme_changed {
            self.stylesheet = None;
            self.colors = None;
        }
        if language_changed {
            self.labels.clear();
        }
        theme_changed || language_changed
    }

    /// Translated label, computed once per language.
    pub fn label(&mut self, ctx: &AppContext, key: &'static str, default: &str) -> &str {
        self.labels
            .entry(key)
            .or_insert_with(|| ctx.translations.translate(key, Some(default)))
    }

    /// Resolved stylesheet, computed once per theme.
    pub fn stylesheet(&mut self, ctx: &AppContext) -> &str {
        self.stylesheet.get_or_insert_with(|| ctx.stylesheet())
    }

    pub fn colors(&mut self, ctx: &AppContext) -> &ThemeColors {
        self.colors.get_or_insert_with(|| ctx.themes.colors())
    }
}
