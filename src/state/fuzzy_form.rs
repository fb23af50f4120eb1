//! Input fields of the fuzzy-set creation form.

use rmvvm::models::Universe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeKind {
    #[default]
    Triangular,
    Trapezoidal,
    Gaussian,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Triangular, ShapeKind::Trapezoidal, ShapeKind::Gaussian];

    pub fn label_key(self) -> &'static str {
        match self {
            ShapeKind::Triangular => "fuzzy.shape.triangular",
            ShapeKind::Trapezoidal => "fuzzy.shape.trapezoidal",
            ShapeKind::Gaussian => "fuzzy.shape.gaussian",
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            ShapeKind::Triangular => "Triangular",
            ShapeKind::Trapezoidal => "Trapezoidal",
            ShapeKind::Gaussian => "Gaussian",
        }
    }
}

/// Values typed into the form. Parameters unused by the chosen shape are kept
/// so switching shapes does not lose them.
#[derive(Debug, Clone)]
pub struct FuzzyFormState {
    pub name: String,
    pub shape: ShapeKind,
    pub params: [f64; 4],
    pub center: f64,
    pub sigma: f64,
    pub universe: Universe,
}

impl Default for FuzzyFormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            shape: ShapeKind::Triangular,
            params: [0.0, 25.0, 50.0, 75.0],
            center: 50.0,
            sigma: 10.0,
            universe: Universe::default(),
        }
    }
}

impl FuzzyFormState {
    /// Clears the name, keeping the numbers for the next set.
    pub fn clear_name(&mut self) {
        self.name.clear();
    }
}
