//! Counter view: the value, its controls, and increment progress.

use eframe::egui;
use egui::RichText;
use rmvvm::models::{MAX_COUNT, MIN_COUNT};

use crate::app::AppState;

pub enum CounterInteraction {
    Increment,
    Decrement,
    Reset,
}

pub fn render_counter_view(ui: &mut egui::Ui, state: &mut AppState) -> Option<CounterInteraction> {
    let mut interaction = None;
    let ctx = &state.context;
    let cache = &mut state.caches.counter;

    let heading = cache.label(ctx, "counter.title", "Counter").to_owned();
    let increment = cache.label(ctx, "counter.increment", "Increment").to_owned();
    let decrement = cache.label(ctx, "counter.decrement", "Decrement").to_owned();
    let reset = cache.label(ctx, "counter.reset", "Reset").to_owned();
    let colors = cache.colors(ctx).clone();

    let count = state.counter.count();
    let range_text = ctx.translations.translate_plural(
        "counter.clicks",
        i64::from(count),
        Some("clicks"),
    );

    ui.heading(heading);
    ui.separator();

    ui.vertical_centered(|ui| {
        ui.label(RichText::new(count.to_string()).size(48.0).color(colors.primary));
        ui.label(
            RichText::new(format!("{count} {range_text} ({MIN_COUNT}..={MAX_COUNT})"))
                .color(colors.text_secondary),
        );

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(state.counter.can_decrement(), egui::Button::new(format!("➖ {decrement}")))
                .clicked()
            {
                interaction = Some(CounterInteraction::Decrement);
            }
            if ui
                .add_enabled(state.counter.can_increment(), egui::Button::new(format!("➕ {increment}")))
                .clicked()
            {
                interaction = Some(CounterInteraction::Increment);
            }
            if ui
                .add_enabled(!state.counter.is_busy(), egui::Button::new(reset))
                .clicked()
            {
                interaction = Some(CounterInteraction::Reset);
            }
        });

        if let Some(progress) = state.counter.progress() {
            ui.add(
                egui::ProgressBar::new(f32::from(progress) / 100.0)
                    .desired_width(240.0)
                    .show_percentage(),
            );
        }

        if let Some(err) = state.counter.last_error() {
            ui.colored_label(colors.error, err);
        }
    });

    interaction
}
