//! Fuzzy-set editor view: creation form, set list, and a membership curve.

use eframe::egui;
use egui::{pos2, Color32, Rect, Sense, Stroke, Vec2};
use rmvvm::models::FuzzySet;

use crate::app::AppState;
use crate::state::ShapeKind;

const CURVE_SAMPLES: usize = 101;

pub enum FuzzySetsInteraction {
    Create,
    Select(String),
    Remove(String),
}

pub fn render_fuzzy_sets_view(ui: &mut egui::Ui, state: &mut AppState) -> Option<FuzzySetsInteraction> {
    let mut interaction = None;
    let ctx = &state.context;
    let cache = &mut state.caches.fuzzy;

    let heading = cache.label(ctx, "fuzzy.title", "Fuzzy Sets").to_owned();
    let name_label = cache.label(ctx, "fuzzy.name", "Name").to_owned();
    let shape_label = cache.label(ctx, "fuzzy.shape.label", "Shape").to_owned();
    let universe_label = cache.label(ctx, "fuzzy.universe", "Universe").to_owned();
    let create_label = cache.label(ctx, "fuzzy.create", "Create").to_owned();
    let remove_label = cache.label(ctx, "fuzzy.remove", "Remove").to_owned();
    let empty_label = cache.label(ctx, "fuzzy.empty", "No fuzzy sets yet").to_owned();
    let shape_names: Vec<(ShapeKind, String)> = ShapeKind::ALL
        .iter()
        .map(|shape| (*shape, cache.label(ctx, shape.label_key(), shape.default_label()).to_owned()))
        .collect();
    let colors = cache.colors(ctx).clone();

    ui.heading(heading);
    ui.separator();

    // Creation form
    let form = &mut state.fuzzy_form;
    egui::Grid::new("fuzzy_form").num_columns(2).spacing([8.0, 4.0]).show(ui, |ui| {
        ui.label(name_label);
        ui.text_edit_singleline(&mut form.name);
        ui.end_row();

        ui.label(shape_label);
        ui.horizontal(|ui| {
            for (shape, name) in &shape_names {
                ui.radio_value(&mut form.shape, *shape, name.as_str());
            }
        });
        ui.end_row();

        match form.shape {
            ShapeKind::Triangular | ShapeKind::Trapezoidal => {
                let count = if form.shape == ShapeKind::Triangular { 3 } else { 4 };
                ui.label("a, b, c, d");
                ui.horizontal(|ui| {
                    for value in form.params.iter_mut().take(count) {
                        ui.add(egui::DragValue::new(value).speed(0.5));
                    }
                });
            }
            ShapeKind::Gaussian => {
                ui.label("μ, σ");
                ui.horizontal(|ui| {
                    ui.add(egui::DragValue::new(&mut form.center).speed(0.5));
                    ui.add(egui::DragValue::new(&mut form.sigma).speed(0.1));
                });
            }
        }
        ui.end_row();

        ui.label(universe_label);
        ui.horizontal(|ui| {
            ui.add(egui::DragValue::new(&mut form.universe.min).speed(1.0));
            ui.label("..");
            ui.add(egui::DragValue::new(&mut form.universe.max).speed(1.0));
        });
        ui.end_row();
    });

    if ui.button(format!("➕ {create_label}")).clicked() {
        interaction = Some(FuzzySetsInteraction::Create);
    }

    for problem in state.fuzzy.validation_errors() {
        ui.colored_label(colors.warning, problem);
    }

    ui.separator();

    // Set list
    if state.fuzzy.sets().is_empty() {
        ui.label(empty_label);
    }
    let selected_id = state.fuzzy.selected().map(|set| set.id.clone());
    for set in state.fuzzy.sets() {
        ui.horizontal(|ui| {
            let is_selected = selected_id.as_deref() == Some(set.id.as_str());
            let text = format!("{} ({})", set.name, set.function.kind());
            if ui.selectable_label(is_selected, text).clicked() {
                interaction = Some(FuzzySetsInteraction::Select(set.id.clone()));
            }
            if ui.small_button(&remove_label).clicked() {
                interaction = Some(FuzzySetsInteraction::Remove(set.id.clone()));
            }
        });
    }

    if let Some(set) = state.fuzzy.selected() {
        ui.separator();
        render_membership_curve(ui, set, colors.primary, colors.border);
    }

    interaction
}

/// Draws `set`'s membership over its universe as a polyline.
fn render_membership_curve(ui: &mut egui::Ui, set: &FuzzySet, line: Color32, frame: Color32) {
    let size = Vec2::new(ui.available_width().min(480.0), 160.0);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, frame), egui::StrokeKind::Inside);

    let samples = set.sample(CURVE_SAMPLES);
    let span = set.universe.max - set.universe.min;
    if samples.is_empty() || span <= 0.0 {
        return;
    }

    let inner = rect.shrink(4.0);
    let points: Vec<_> = samples
        .iter()
        .map(|(x, y)| to_screen(inner, (*x - set.universe.min) / span, *y))
        .collect();
    painter.add(egui::Shape::line(points, Stroke::new(2.0, line)));
}

fn to_screen(rect: Rect, fx: f64, fy: f64) -> egui::Pos2 {
    pos2(
        rect.left() + rect.width() * fx as f32,
        rect.bottom() - rect.height() * fy as f32,
    )
}
