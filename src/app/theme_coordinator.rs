//! Keeps egui's visuals in step with the active theme.

use rmvvm::{AppContext, Subscription};
use tracing::debug;

/// Re-applies visuals when the Theme Context reports a change.
pub struct ThemeCoordinator {
    changes: Subscription,
    applied: bool,
}

impl ThemeCoordinator {
    pub fn new(context: &mut AppContext) -> Self {
        Self {
            changes: context.themes.subscribe(),
            applied: false,
        }
    }

    /// Applies the palette's colors to `ctx` on the first frame and after
    /// every theme change. Returns true if visuals were replaced.
    pub fn apply_if_changed(&mut self, ctx: &egui::Context, context: &AppContext) -> bool {
        let changed = self.changes.take_changed();
        if self.applied && !changed {
            return false;
        }
        ctx.set_visuals(context.themes.colors().visuals());
        self.applied = true;
        debug!(theme = ?context.themes.current_theme(), "visuals applied");
        true
    }
}
