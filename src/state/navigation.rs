//! Navigation between the application's views.

use serde::{Deserialize, Serialize};

/// The views reachable from the navigation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActiveView {
    #[default]
    Counter,
    FuzzySets,
    Rules,
    Themes,
}

impl ActiveView {
    pub const ALL: [ActiveView; 4] = [
        ActiveView::Counter,
        ActiveView::FuzzySets,
        ActiveView::Rules,
        ActiveView::Themes,
    ];

    /// Translation key of the view's navigation label.
    pub fn label_key(self) -> &'static str {
        match self {
            ActiveView::Counter => "nav.counter",
            ActiveView::FuzzySets => "nav.fuzzy_sets",
            ActiveView::Rules => "nav.rules",
            ActiveView::Themes => "nav.themes",
        }
    }

    /// English label used when no translation exists.
    pub fn default_label(self) -> &'static str {
        match self {
            ActiveView::Counter => "Counter",
            ActiveView::FuzzySets => "Fuzzy Sets",
            ActiveView::Rules => "Rules",
            ActiveView::Themes => "Themes",
        }
    }
}

/// Tracks the visible view.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    current: ActiveView,
}

impl NavigationState {
    pub fn new(current: ActiveView) -> Self {
        Self { current }
    }

    pub fn current(&self) -> ActiveView {
        self.current
    }

    /// Switches views; returns true if the view actually changed.
    pub fn navigate(&mut self, view: ActiveView) -> bool {
        let changed = self.current != view;
        self.current = view;
        changed
    }
}
