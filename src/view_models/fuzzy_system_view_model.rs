//! Fuzzy system view model: variables, validation, evaluation and persistence.
//!
//! The sets and rules themselves are edited by their own view models; the
//! coordinator copies them in with [`FuzzySystemViewModel::sync`].

use std::collections::{BTreeMap, BTreeSet};

use rmvvm::models::{FuzzyRule, FuzzySet, FuzzySystem};
use rmvvm::FuzzySystemStore;
use tracing::{info, warn};

#[derive(Debug)]
pub struct FuzzySystemViewModel {
    store: FuzzySystemStore,
    system: Option<FuzzySystem>,
    validation_errors: Vec<String>,
    results: BTreeMap<String, f64>,
    saved: BTreeSet<String>,
    status: Option<String>,
    next_id: u64,
}

impl FuzzySystemViewModel {
    pub fn new(store: FuzzySystemStore) -> Self {
        let saved = store.list();
        Self {
            store,
            system: None,
            validation_errors: Vec::new(),
            results: BTreeMap::new(),
            saved,
            status: None,
            next_id: 0,
        }
    }

    // ===== Queries =====

    pub fn system(&self) -> Option<&FuzzySystem> {
        self.system.as_ref()
    }

    pub fn validation_errors(&self) -> &[String] {
        &self.validation_errors
    }

    /// Outputs of the last successful evaluation.
    pub fn results(&self) -> &BTreeMap<String, f64> {
        &self.results
    }

    /// Names of the systems in the data directory, as of the last refresh.
    pub fn saved_systems(&self) -> &BTreeSet<String> {
        &self.saved
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    // ===== Commands =====

    /// Starts an empty system, replacing the current one.
    pub fn create_new_system(&mut self, name: &str, description: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            self.status = Some("system name is required".to_string());
            return false;
        }
        self.next_id += 1;
        let id = format!("system-{}", self.next_id);
        info!(%id, name, "created fuzzy system");
        self.system = Some(FuzzySystem::new(id, name, description.trim()));
        self.results.clear();
        self.status = None;
        self.revalidate();
        true
    }

    pub fn add_input_variable(&mut self, variable: &str) -> bool {
        self.edit_variables(variable, FuzzySystem::add_input_variable)
    }

    pub fn add_output_variable(&mut self, variable: &str) -> bool {
        self.edit_variables(variable, FuzzySystem::add_output_variable)
    }

    /// Copies the edited sets and rules into the current system.
    pub fn sync(&mut self, sets: &[FuzzySet], rules: &[FuzzyRule]) {
        let Some(system) = self.system.as_mut() else {
            return;
        };
        if system.fuzzy_sets != sets || system.rules != rules {
            system.fuzzy_sets = sets.to_vec();
            system.rules = rules.to_vec();
            self.revalidate();
        }
    }

    /// Runs the current system. Invalid systems are not evaluated.
    pub fn evaluate(&mut self, inputs: &BTreeMap<String, f64>) -> bool {
        let Some(system) = &self.system else {
            self.status = Some("no fuzzy system".to_string());
            return false;
        };
        if !self.validation_errors.is_empty() {
            self.status = Some("fix the validation errors before evaluating".to_string());
            return false;
        }
        match system.evaluate(inputs) {
            Ok(results) => {
                info!(system = %system.name, ?inputs, ?results, "evaluated fuzzy system");
                self.results = results;
                self.status = None;
                true
            }
            Err(err) => {
                self.status = Some(err.to_string());
                false
            }
        }
    }

    pub fn save(&mut self) -> bool {
        let Some(system) = &self.system else {
            self.status = Some("no fuzzy system".to_string());
            return false;
        };
        match self.store.save(system) {
            Ok(path) => {
                self.status = Some(format!("saved to {}", path.display()));
                self.saved = self.store.list();
                true
            }
            Err(err) => {
                warn!(system = %system.name, %err, "fuzzy system not saved");
                self.status = Some(err.to_string());
                false
            }
        }
    }

    /// Loads a saved system and returns it so its sets and rules can be
    /// handed to their editors.
    pub fn load(&mut self, name: &str) -> Option<FuzzySystem> {
        match self.store.load(name) {
            Ok(system) => {
                self.system = Some(system.clone());
                self.results.clear();
                self.status = Some(format!("loaded '{}'", system.name));
                self.revalidate();
                Some(system)
            }
            Err(err) => {
                warn!(system = name, %err, "fuzzy system not loaded");
                self.status = Some(err.to_string());
                self.saved = self.store.list();
                None
            }
        }
    }

    pub fn refresh_saved(&mut self) {
        self.saved = self.store.list();
    }

    fn edit_variables(&mut self, variable: &str, add: fn(&mut FuzzySystem, &str) -> bool) -> bool {
        let Some(system) = self.system.as_mut() else {
            self.status = Some("no fuzzy system".to_string());
            return false;
        };
        let added = add(system, variable);
        if added {
            self.revalidate();
        }
        added
    }

    fn revalidate(&mut self) {
        self.validation_errors = self
            .system
            .as_ref()
            .map(FuzzySystem::validate)
            .unwrap_or_default();
    }
}
