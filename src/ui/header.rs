//! Header panel UI rendering
//!
//! Shows the application title and the theme and language selectors.

use eframe::egui;
use rmvvm::TranslationContext;

use crate::app::AppState;

pub enum HeaderInteraction {
    ThemeSelected(String),
    LanguageSelected(String),
}

pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    let title = state.caches.header.label(&state.context, "app.title", "MVVM Demo").to_owned();
    let theme_label = state.caches.header.label(&state.context, "header.theme", "Theme:").to_owned();
    let language_label = state
        .caches
        .header
        .label(&state.context, "header.language", "Language:")
        .to_owned();

    ui.horizontal(|ui| {
        ui.heading(title);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let current_language = state.context.translations.current_language().to_string();
            let mut selected_language = current_language.clone();
            egui::ComboBox::from_id_salt("language_selector")
                .selected_text(TranslationContext::language_name(&current_language))
                .show_ui(ui, |ui| {
                    for code in state.context.translations.available_languages() {
                        let name = TranslationContext::language_name(&code).to_string();
                        ui.selectable_value(&mut selected_language, code, name);
                    }
                });
            ui.label(language_label);

            ui.separator();

            let current_theme = state.context.themes.current_theme().unwrap_or_default().to_string();
            let mut selected_theme = current_theme.clone();
            egui::ComboBox::from_id_salt("theme_selector")
                .selected_text(&current_theme)
                .show_ui(ui, |ui| {
                    for name in state.context.themes.available_themes() {
                        let label = name.clone();
                        ui.selectable_value(&mut selected_theme, name, label);
                    }
                });
            ui.label(theme_label);

            if selected_theme != current_theme {
                interaction = Some(HeaderInteraction::ThemeSelected(selected_theme));
            } else if selected_language != current_language {
                interaction = Some(HeaderInteraction::LanguageSelected(selected_language));
            }
        });
    });

    interaction
}
