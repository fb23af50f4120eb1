//! Fuzzy-set editor view model.

use rmvvm::models::{FuzzySet, MembershipFunction, Universe};
use tracing::info;

use super::rules_view_model::highest_suffix;

/// List of fuzzy sets being edited, the selection, and validation results.
#[derive(Debug, Default)]
pub struct FuzzySetsViewModel {
    sets: Vec<FuzzySet>,
    selected: Option<String>,
    validation_errors: Vec<String>,
    next_id: u64,
}

impl FuzzySetsViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queries =====

    pub fn sets(&self) -> &[FuzzySet] {
        &self.sets
    }

    pub fn selected(&self) -> Option<&FuzzySet> {
        let id = self.selected.as_deref()?;
        self.sets.iter().find(|set| set.id == id)
    }

    pub fn validation_errors(&self) -> &[String] {
        &self.validation_errors
    }

    // ===== Commands =====

    pub fn create_triangular(&mut self, name: &str, a: f64, b: f64, c: f64, universe: Universe) -> String {
        self.add(name, MembershipFunction::Triangular { a, b, c }, universe)
    }

    pub fn create_trapezoidal(
        &mut self,
        name: &str,
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        universe: Universe,
    ) -> String {
        self.add(name, MembershipFunction::Trapezoidal { a, b, c, d }, universe)
    }

    pub fn create_gaussian(&mut self, name: &str, center: f64, sigma: f64, universe: Universe) -> String {
        self.add(name, MembershipFunction::Gaussian { center, sigma }, universe)
    }

    /// Removes a set, clearing the selection if it pointed at it.
    pub fn remove(&mut self, id: &str) {
        self.sets.retain(|set| set.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        info!(id, "removed fuzzy set");
        self.revalidate();
    }

    /// Selects a set by id; unknown ids clear the selection.
    pub fn select(&mut self, id: &str) {
        self.selected = self
            .sets
            .iter()
            .any(|set| set.id == id)
            .then(|| id.to_string());
    }

    /// Swaps in sets read from a saved system.
    pub fn replace_sets(&mut self, sets: Vec<FuzzySet>) {
        let loaded = highest_suffix(sets.iter().map(|set| set.id.as_str()), "set-");
        self.next_id = self.next_id.max(loaded);
        self.sets = sets;
        self.selected = None;
        self.revalidate();
    }

    fn add(&mut self, name: &str, function: MembershipFunction, universe: Universe) -> String {
        self.next_id += 1;
        let id = format!("set-{}", self.next_id);
        let name = if name.trim().is_empty() {
            id.clone()
        } else {
            name.trim().to_string()
        };
        info!(%id, %name, kind = function.kind(), "created fuzzy set");
        self.sets.push(FuzzySet::new(id.clone(), name, function, universe));
        self.revalidate();
        id
    }

    fn revalidate(&mut self) {
        self.validation_errors = self.sets.iter().flat_map(FuzzySet::validate).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_select_remove() {
        let mut vm = FuzzySetsViewModel::new();
        let cold = vm.create_triangular("cold", 0.0, 10.0, 20.0, Universe::default());
        let warm = vm.create_gaussian("warm", 50.0, 10.0, Universe::default());

        assert_eq!(vm.sets().len(), 2);
        assert!(vm.validation_errors().is_empty());

        vm.select(&warm);
        assert_eq!(vm.selected().map(|s| s.name.as_str()), Some("warm"));

        vm.remove(&warm);
        assert!(vm.selected().is_none());
        assert_eq!(vm.sets()[0].id, cold);
    }

    #[test]
    fn test_invalid_parameters_are_reported_and_cleared() {
        let mut vm = FuzzySetsViewModel::new();
        let bad = vm.create_trapezoidal("hot", 10.0, 5.0, 20.0, 30.0, Universe::default());
        assert_eq!(vm.validation_errors().len(), 1);

        vm.remove(&bad);
        assert!(vm.validation_errors().is_empty());
    }

    #[test]
    fn test_blank_name_uses_id_and_unknown_select_clears() {
        let mut vm = FuzzySetsViewModel::new();
        let id = vm.create_gaussian("  ", 0.0, 1.0, Universe::default());
        assert_eq!(vm.sets()[0].name, id);

        vm.select(&id);
        vm.select("nope");
        assert!(vm.selected().is_none());
    }

    #[test]
    fn test_replaced_sets_keep_ids_unique() {
        let mut vm = FuzzySetsViewModel::new();
        vm.create_gaussian("old", 0.0, 1.0, Universe::default());
        let loaded = FuzzySet::new(
            "set-4",
            "loaded",
            MembershipFunction::Gaussian { center: 5.0, sigma: 1.0 },
            Universe::default(),
        );
        vm.replace_sets(vec![loaded]);

        assert_eq!(vm.sets().len(), 1);
        assert_eq!(vm.create_gaussian("new", 0.0, 1.0, Universe::default()), "set-5");
    }
}
