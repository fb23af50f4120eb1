//! Panel orchestration and layout management.
//!
//! Lays out the header, navigation, status bar, and the active view, and
//! folds each panel's interaction into one [`PanelInteraction`].

use std::path::PathBuf;

use crate::app::AppState;
use crate::state::ActiveView;
use crate::ui::counter_view::{self, CounterInteraction};
use crate::ui::fuzzy_sets_view::{self, FuzzySetsInteraction};
use crate::ui::header::{self, HeaderInteraction};
use crate::ui::rules_view::{self, RulesInteraction};
use crate::ui::theme_view::{self, ThemeViewInteraction};
use crate::ui::{navigation_panel, status_bar};

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    ThemeSelected(String),
    LanguageSelected(String),
    Navigate(ActiveView),
    IncrementRequested,
    DecrementRequested,
    ResetRequested,
    CreateFuzzySetRequested,
    FuzzySetSelected(String),
    FuzzySetRemoved(String),
    CreateFuzzySystemRequested,
    AddInputVariableRequested,
    AddOutputVariableRequested,
    SaveFuzzySystemRequested,
    LoadFuzzySystemRequested(String),
    RefreshSavedSystemsRequested,
    CreateRuleRequested,
    UpdateRuleRequested,
    RuleSelected(String),
    RuleRemoved(String),
    EvaluateRequested,
    ApplyThemeRequested(String),
    DeleteThemeRequested(String),
    ImportThemeRequested(PathBuf),
    RefreshThemesRequested,
    CreateThemeRequested,
    CopyActiveColorsRequested,
}

impl From<HeaderInteraction> for PanelInteraction {
    fn from(value: HeaderInteraction) -> Self {
        match value {
            HeaderInteraction::ThemeSelected(name) => PanelInteraction::ThemeSelected(name),
            HeaderInteraction::LanguageSelected(code) => PanelInteraction::LanguageSelected(code),
        }
    }
}

impl From<CounterInteraction> for PanelInteraction {
    fn from(value: CounterInteraction) -> Self {
        match value {
            CounterInteraction::Increment => PanelInteraction::IncrementRequested,
            CounterInteraction::Decrement => PanelInteraction::DecrementRequested,
            CounterInteraction::Reset => PanelInteraction::ResetRequested,
        }
    }
}

impl From<FuzzySetsInteraction> for PanelInteraction {
    fn from(value: FuzzySetsInteraction) -> Self {
        match value {
            FuzzySetsInteraction::Create => PanelInteraction::CreateFuzzySetRequested,
            FuzzySetsInteraction::Select(id) => PanelInteraction::FuzzySetSelected(id),
            FuzzySetsInteraction::Remove(id) => PanelInteraction::FuzzySetRemoved(id),
        }
    }
}

impl From<RulesInteraction> for PanelInteraction {
    fn from(value: RulesInteraction) -> Self {
        match value {
            RulesInteraction::CreateSystem => PanelInteraction::CreateFuzzySystemRequested,
            RulesInteraction::AddInput => PanelInteraction::AddInputVariableRequested,
            RulesInteraction::AddOutput => PanelInteraction::AddOutputVariableRequested,
            RulesInteraction::SaveSystem => PanelInteraction::SaveFuzzySystemRequested,
            RulesInteraction::LoadSystem(name) => PanelInteraction::LoadFuzzySystemRequested(name),
            RulesInteraction::RefreshSaved => PanelInteraction::RefreshSavedSystemsRequested,
            RulesInteraction::CreateRule => PanelInteraction::CreateRuleRequested,
            RulesInteraction::UpdateRule => PanelInteraction::UpdateRuleRequested,
            RulesInteraction::SelectRule(id) => PanelInteraction::RuleSelected(id),
            RulesInteraction::RemoveRule(id) => PanelInteraction::RuleRemoved(id),
            RulesInteraction::Evaluate => PanelInteraction::EvaluateRequested,
        }
    }
}

impl From<ThemeViewInteraction> for PanelInteraction {
    fn from(value: ThemeViewInteraction) -> Self {
        match value {
            ThemeViewInteraction::Apply(name) => PanelInteraction::ApplyThemeRequested(name),
            ThemeViewInteraction::Delete(name) => PanelInteraction::DeleteThemeRequested(name),
            ThemeViewInteraction::Import(path) => PanelInteraction::ImportThemeRequested(path),
            ThemeViewInteraction::Refresh => PanelInteraction::RefreshThemesRequested,
            ThemeViewInteraction::Create => PanelInteraction::CreateThemeRequested,
            ThemeViewInteraction::LoadEditorFromCurrent => PanelInteraction::CopyActiveColorsRequested,
        }
    }
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels. Called from `eframe::App::update`.
    pub fn render_all_panels(ctx: &egui::Context, state: &mut AppState) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(header_interaction.into());
            }
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        egui::SidePanel::left("navigation_panel")
            .default_width(160.0)
            .resizable(true)
            .show(ctx, |ui| {
                if let Some(view) = navigation_panel::render_navigation_panel(ui, state) {
                    interaction = Some(PanelInteraction::Navigate(view));
                }
            });

        let content_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(8))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default().frame(content_frame).show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let view_interaction: Option<PanelInteraction> = match state.navigation.current() {
                    ActiveView::Counter => counter_view::render_counter_view(ui, state).map(Into::into),
                    ActiveView::FuzzySets => {
                        fuzzy_sets_view::render_fuzzy_sets_view(ui, state).map(Into::into)
                    }
                    ActiveView::Rules => rules_view::render_rules_view(ui, state).map(Into::into),
                    ActiveView::Themes => theme_view::render_theme_view(ui, state).map(Into::into),
                };
                if view_interaction.is_some() {
                    interaction = view_interaction;
                }
            });
        });

        interaction
    }
}
