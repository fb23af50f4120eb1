//! Side panel for switching views.

use eframe::egui;

use crate::app::AppState;
use crate::state::ActiveView;

pub fn render_navigation_panel(ui: &mut egui::Ui, state: &mut AppState) -> Option<ActiveView> {
    let mut selected = None;
    let current = state.navigation.current();

    ui.vertical(|ui| {
        for view in ActiveView::ALL {
            let label = state
                .caches
                .navigation
                .label(&state.context, view.label_key(), view.default_label())
                .to_owned();
            if ui.selectable_label(current == view, label).clicked() && current != view {
                selected = Some(view);
            }
        }
    });

    selected
}
