//! View models: presentation logic between the models and the egui views.
//!
//! View models own their model and any background work. Views read from
//! them and call intent-revealing methods; nothing here draws.

mod counter_view_model;
mod fuzzy_sets_view_model;
mod fuzzy_system_view_model;
mod rules_view_model;
mod theme_view_model;

pub use counter_view_model::CounterViewModel;
pub use fuzzy_sets_view_model::FuzzySetsViewModel;
pub use fuzzy_system_view_model::FuzzySystemViewModel;
pub use rules_view_model::RulesViewModel;
pub use theme_view_model::ThemeViewModel;
