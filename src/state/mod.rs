//! State management modules for the GUI.
//!
//! This module contains state-only logic (no drawing):
//! - Navigation state (which view is shown)
//! - View caches (translated labels and resolved stylesheets per view)
//! - Form input for the fuzzy-set, rule and system editors

mod fuzzy_form;
mod navigation;
mod rule_form;
mod view_cache;

pub use fuzzy_form::{FuzzyFormState, ShapeKind};
pub use navigation::{ActiveView, NavigationState};
pub use rule_form::{RuleFormState, SystemFormState};
pub use view_cache::ViewCache;
