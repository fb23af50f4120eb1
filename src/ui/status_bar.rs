//! Status bar UI rendering
//!
//! Shows memory usage, the application name, the active theme and language,
//! and the last error.

use eframe::egui;
use egui::RichText;
use rmvvm::TranslationContext;

use crate::app::AppState;
use crate::utils::{format_memory_mb, get_current_memory_mb};

pub fn render_status_bar(ui: &mut egui::Ui, state: &mut AppState) {
    let ctx = &state.context;
    let cache = &mut state.caches.status;
    let theme_label = cache.label(ctx, "status.theme", "Theme").to_owned();
    let language_label = cache.label(ctx, "status.language", "Language").to_owned();
    let working_label = cache.label(ctx, "status.working", "Working…").to_owned();
    let error_color = cache.colors(ctx).error;

    ui.horizontal(|ui| {
        let memory_text = format_memory_mb(get_current_memory_mb());
        ui.label(RichText::new(&memory_text).strong());
        ui.label(RichText::new("|").strong());

        ui.label(RichText::new(&ctx.config.app.name).strong());
        ui.label(RichText::new("|").strong());

        let theme = ctx.themes.current_theme().unwrap_or("-");
        let language = TranslationContext::language_name(ctx.translations.current_language());
        ui.label(format!("{theme_label}: {theme} | {language_label}: {language}"));

        if state.counter.is_busy() {
            ui.label(RichText::new("|").strong());
            ui.spinner();
            ui.label(working_label);
        }

        if let Some(err) = &state.error_message {
            ui.label(RichText::new("|").strong());
            ui.colored_label(error_color, err);
        }
    });
}
