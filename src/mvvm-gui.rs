//! MVVM demo GUI application
//!
//! A small desktop application built on egui that exercises the `rmvvm`
//! library: runtime theme switching, runtime language switching, and view
//! models that keep long work off the GUI thread.
//!
//! The application is organised as:
//! - `app/` - Centralized state and the coordinators that mutate it
//! - `view_models/` - Presentation logic for each view
//! - `io/` - Background task runner
//! - `state/` - Navigation, form, and per-view cache state
//! - `ui/` - Panel rendering
//! - `utils/` - Formatting helpers

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use anyhow::Context as _;
use eframe::egui;
use rmvvm::{config, init_logging, AppConfig, AppContext};
use tracing::{error, info};

mod app;
mod io;
mod state;
mod ui;
mod utils;
mod view_models;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator, ThemeCoordinator};
use ui::panel_manager::{PanelInteraction, PanelManager};

fn main() -> anyhow::Result<()> {
    // Optional first argument: path to the configuration file
    let explicit_config = std::env::args().nth(1).map(PathBuf::from);
    let config_path = config::default_config_path(explicit_config);

    let (config, load_error) = match AppConfig::load(&config_path) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    config::initialize(config);
    let config = config::get()?;
    init_logging(&config.app.log_level);

    match (load_error, config.loaded_from()) {
        (Some(err), _) => {
            error!(path = %config_path.display(), %err, "configuration not loaded, using defaults");
        }
        (None, Some(path)) => info!(path = %path.display(), "configuration loaded"),
        (None, None) => {
            info!(path = %config_path.display(), "configuration file not found, using defaults");
        }
    }
    info!(path = %config_path.display(), "starting {}", config.app.name);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width as f32, config.window.height as f32])
            .with_title(&config.app.name),
        ..Default::default()
    };

    let context = AppContext::new(config.clone());
    eframe::run_native(
        &config.app.name,
        options,
        Box::new(move |cc| Ok(Box::new(MvvmDemoApp::new(cc, context)))),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
    .context("GUI event loop failed")
}

/// The demo application; delegates to coordinators and the panel manager.
struct MvvmDemoApp {
    state: AppState,
    theme: ThemeCoordinator,
}

impl MvvmDemoApp {
    /// Creates the application and restores preferences from persistent storage.
    fn new(cc: &eframe::CreationContext, mut context: AppContext) -> Self {
        let theme = ThemeCoordinator::new(&mut context);
        let mut state = AppState::new(context);

        let preferences = SettingsCoordinator::load_preferences(cc.storage);
        ApplicationCoordinator::restore_preferences(&mut state, &preferences);

        Self { state, theme }
    }

    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        let state = &mut self.state;
        match interaction {
            PanelInteraction::ThemeSelected(name) => ApplicationCoordinator::select_theme(state, &name),
            PanelInteraction::ApplyThemeRequested(name) => ApplicationCoordinator::apply_theme(state, &name),
            PanelInteraction::LanguageSelected(code) => {
                ApplicationCoordinator::select_language(state, &code);
            }
            PanelInteraction::Navigate(view) => ApplicationCoordinator::navigate(state, view),
            PanelInteraction::IncrementRequested => ApplicationCoordinator::increment_counter(state, ctx),
            PanelInteraction::DecrementRequested => ApplicationCoordinator::decrement_counter(state),
            PanelInteraction::ResetRequested => ApplicationCoordinator::reset_counter(state),
            PanelInteraction::CreateFuzzySetRequested => ApplicationCoordinator::create_fuzzy_set(state),
            PanelInteraction::FuzzySetSelected(id) => ApplicationCoordinator::select_fuzzy_set(state, &id),
            PanelInteraction::FuzzySetRemoved(id) => ApplicationCoordinator::remove_fuzzy_set(state, &id),
            PanelInteraction::CreateFuzzySystemRequested => {
                ApplicationCoordinator::create_fuzzy_system(state);
            }
            PanelInteraction::AddInputVariableRequested => ApplicationCoordinator::add_input_variable(state),
            PanelInteraction::AddOutputVariableRequested => {
                ApplicationCoordinator::add_output_variable(state);
            }
            PanelInteraction::SaveFuzzySystemRequested => ApplicationCoordinator::save_fuzzy_system(state),
            PanelInteraction::LoadFuzzySystemRequested(name) => {
                ApplicationCoordinator::load_fuzzy_system(state, &name);
            }
            PanelInteraction::RefreshSavedSystemsRequested => {
                ApplicationCoordinator::refresh_saved_systems(state);
            }
            PanelInteraction::CreateRuleRequested => ApplicationCoordinator::create_rule(state),
            PanelInteraction::UpdateRuleRequested => ApplicationCoordinator::update_selected_rule(state),
            PanelInteraction::RuleSelected(id) => ApplicationCoordinator::select_rule(state, &id),
            PanelInteraction::RuleRemoved(id) => ApplicationCoordinator::remove_rule(state, &id),
            PanelInteraction::EvaluateRequested => ApplicationCoordinator::evaluate_fuzzy_system(state),
            PanelInteraction::DeleteThemeRequested(name) => {
                ApplicationCoordinator::delete_theme(state, &name);
            }
            PanelInteraction::ImportThemeRequested(path) => {
                ApplicationCoordinator::import_theme(state, &path);
            }
            PanelInteraction::RefreshThemesRequested => ApplicationCoordinator::refresh_themes(state),
            PanelInteraction::CreateThemeRequested => ApplicationCoordinator::create_theme(state),
            PanelInteraction::CopyActiveColorsRequested => {
                ApplicationCoordinator::load_editor_from_current(state);
            }
        }
    }
}

impl eframe::App for MvvmDemoApp {
    /// Called on shutdown and periodically by eframe.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let preferences = ApplicationCoordinator::preferences(&self.state);
        SettingsCoordinator::save_preferences(storage, &preferences);
    }

    /// 1. Drain background work and change signals
    /// 2. Apply theme visuals if the theme changed
    /// 3. Render all panels
    /// 4. Handle the interaction, if any
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ApplicationCoordinator::poll_background(&mut self.state);
        self.theme.apply_if_changed(ctx, &self.state.context);

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state) {
            self.handle_panel_interaction(interaction, ctx);
            ctx.request_repaint();
        }
    }
}
