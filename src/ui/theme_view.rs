//! Theme management view.
//!
//! Lists the discovered themes, shows the active palette and the stylesheet it
//! resolves to, and hosts the custom-theme editor.

use std::path::PathBuf;

use eframe::egui;
use egui::{Color32, RichText};
use rmvvm::hex_to_color32;

use crate::app::AppState;
use crate::view_models::ThemeViewModel;

pub enum ThemeViewInteraction {
    Apply(String),
    Delete(String),
    Import(PathBuf),
    Refresh,
    Create,
    LoadEditorFromCurrent,
}

pub fn render_theme_view(ui: &mut egui::Ui, state: &mut AppState) -> Option<ThemeViewInteraction> {
    let mut interaction = None;
    let ctx = &state.context;
    let cache = &mut state.caches.themes;

    let heading = cache.label(ctx, "themes.title", "Themes").to_owned();
    let apply_label = cache.label(ctx, "themes.apply", "Apply").to_owned();
    let delete_label = cache.label(ctx, "themes.delete", "Delete").to_owned();
    let import_label = cache.label(ctx, "themes.import", "Import…").to_owned();
    let refresh_label = cache.label(ctx, "themes.refresh", "Refresh").to_owned();
    let palette_label = cache.label(ctx, "themes.palette", "Active palette").to_owned();
    let stylesheet_label = cache.label(ctx, "themes.stylesheet", "Resolved stylesheet").to_owned();
    let editor_label = cache.label(ctx, "themes.editor", "Custom theme").to_owned();
    let name_label = cache.label(ctx, "themes.name", "Name").to_owned();
    let description_label = cache.label(ctx, "themes.description", "Description").to_owned();
    let create_label = cache.label(ctx, "themes.create", "Save theme").to_owned();
    let copy_label = cache.label(ctx, "themes.copy_current", "Copy active colors").to_owned();
    let source_label = cache.label(ctx, "themes.source", "Palette file").to_owned();
    let stylesheet = cache.stylesheet(ctx).to_owned();
    let colors = cache.colors(ctx).clone();

    ui.heading(heading);
    ui.separator();

    ui.horizontal(|ui| {
        if ui.button(format!("📁 {import_label}")).clicked() {
            let mut dialog = rfd::FileDialog::new().add_filter("Theme palettes", &["json"]);
            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }
            if let Some(path) = dialog.pick_file() {
                interaction = Some(ThemeViewInteraction::Import(path));
            }
        }
        if ui.button(format!("🔄 {refresh_label}")).clicked() {
            interaction = Some(ThemeViewInteraction::Refresh);
        }
    });

    let current = ctx.themes.current_theme();
    egui::Grid::new("theme_list").striped(true).show(ui, |ui| {
        for name in ctx.themes.available_themes() {
            let is_current = current == Some(name.as_str());
            let text = if is_current {
                RichText::new(&name).strong().color(colors.primary)
            } else {
                RichText::new(&name)
            };
            ui.label(text);
            if ui.add_enabled(!is_current, egui::Button::new(&apply_label)).clicked() {
                interaction = Some(ThemeViewInteraction::Apply(name.clone()));
            }
            if ui.add_enabled(!is_current, egui::Button::new(&delete_label)).clicked() {
                interaction = Some(ThemeViewInteraction::Delete(name.clone()));
            }
            ui.end_row();
        }
    });

    ui.separator();
    ui.columns(2, |columns| {
        columns[0].label(RichText::new(&palette_label).strong());
        egui::Grid::new("palette_slots").show(&mut columns[0], |ui| {
            for (slot, value) in ThemeViewModel::palette_slots(&ctx.themes) {
                swatch(ui, hex_to_color32(&value).unwrap_or(Color32::TRANSPARENT));
                ui.label(slot);
                ui.monospace(value);
                ui.end_row();
            }
        });

        columns[1].label(RichText::new(&stylesheet_label).strong());
        egui::ScrollArea::vertical()
            .id_salt("stylesheet_preview")
            .max_height(220.0)
            .show(&mut columns[1], |ui| {
                let mut text = stylesheet.as_str();
                ui.add(
                    egui::TextEdit::multiline(&mut text)
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
    });

    if let Some(name) = current {
        egui::CollapsingHeader::new(format!("{source_label}: {name}.json"))
            .id_salt("theme_source")
            .show(ui, |ui| {
                if let Some(source) = ThemeViewModel::read_source(&ctx.themes, name) {
                    ui.monospace(source);
                }
            });
    }

    ui.separator();
    ui.label(RichText::new(editor_label).strong());

    let editor = &mut state.theme_editor;
    egui::Grid::new("theme_editor_fields").num_columns(2).show(ui, |ui| {
        ui.label(name_label);
        ui.text_edit_singleline(&mut editor.new_name);
        ui.end_row();
        ui.label(description_label);
        ui.text_edit_singleline(&mut editor.new_description);
        ui.end_row();
    });

    egui::Grid::new("theme_editor_colors").num_columns(4).show(ui, |ui| {
        for (i, (slot, color)) in editor.slot_colors.iter_mut().enumerate() {
            ui.color_edit_button_srgba(color);
            ui.label(*slot);
            if i % 2 == 1 {
                ui.end_row();
            }
        }
    });

    ui.horizontal(|ui| {
        if ui.button(&copy_label).clicked() {
            interaction = Some(ThemeViewInteraction::LoadEditorFromCurrent);
        }
        if ui.button(format!("💾 {create_label}")).clicked() {
            interaction = Some(ThemeViewInteraction::Create);
        }
    });

    if let Some(status) = editor.status() {
        ui.label(RichText::new(status).color(colors.text_secondary));
    }

    interaction
}

fn swatch(ui: &mut egui::Ui, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 2.0, color);
}
