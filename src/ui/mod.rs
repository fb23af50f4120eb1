//! UI rendering subsystem
//!
//! - Header (theme and language selectors)
//! - Navigation panel (view switcher)
//! - Counter, fuzzy-set, rules, and theme views
//! - Status bar
//! - Panel manager (layout and interaction collection)

pub mod header;
pub mod navigation_panel;
pub mod counter_view;
pub mod fuzzy_sets_view;
pub mod rules_view;
pub mod theme_view;
pub mod status_bar;
pub mod panel_manager;
