//! Rule editor view model.
//!
//! Rules are checked against the variables and set ids the rest of the
//! system currently offers; changing either re-runs validation.

use rmvvm::models::{Condition, FuzzyRule, RuleOperator};
use tracing::info;

#[derive(Debug, Default)]
pub struct RulesViewModel {
    rules: Vec<FuzzyRule>,
    selected: Option<String>,
    validation_errors: Vec<String>,
    input_variables: Vec<String>,
    output_variables: Vec<String>,
    fuzzy_set_ids: Vec<String>,
    next_id: u64,
}

impl RulesViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queries =====

    pub fn rules(&self) -> &[FuzzyRule] {
        &self.rules
    }

    pub fn selected(&self) -> Option<&FuzzyRule> {
        let id = self.selected.as_deref()?;
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn validation_errors(&self) -> &[String] {
        &self.validation_errors
    }

    // ===== Commands =====

    /// Adds a rule and returns its id. A blank name falls back to the id.
    pub fn create_rule(
        &mut self,
        name: &str,
        antecedent: Vec<Condition>,
        consequent: Condition,
        operator: RuleOperator,
    ) -> String {
        self.next_id += 1;
        let id = format!("rule-{}", self.next_id);
        let name = non_blank(name).unwrap_or(&id).to_string();
        info!(%id, %name, conditions = antecedent.len(), "created fuzzy rule");
        self.rules
            .push(FuzzyRule::new(id.clone(), name, antecedent, consequent, operator));
        self.revalidate();
        id
    }

    /// Replaces a rule's contents, keeping its id. Returns false for unknown ids.
    pub fn update_rule(
        &mut self,
        id: &str,
        name: &str,
        antecedent: Vec<Condition>,
        consequent: Condition,
        operator: RuleOperator,
    ) -> bool {
        let Some(rule) = self.rules.iter_mut().find(|rule| rule.id == id) else {
            return false;
        };
        if let Some(name) = non_blank(name) {
            rule.name = name.to_string();
        }
        rule.antecedent = antecedent;
        rule.consequent = consequent;
        rule.operator = operator;
        info!(id, "updated fuzzy rule");
        self.revalidate();
        true
    }

    pub fn remove_rule(&mut self, id: &str) {
        self.rules.retain(|rule| rule.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        info!(id, "removed fuzzy rule");
        self.revalidate();
    }

    /// Selects a rule by id; unknown ids clear the selection.
    pub fn select_rule(&mut self, id: &str) {
        self.selected = self
            .rules
            .iter()
            .any(|rule| rule.id == id)
            .then(|| id.to_string());
    }

    /// Swaps in rules read from a saved system.
    pub fn replace_rules(&mut self, rules: Vec<FuzzyRule>) {
        let loaded = highest_suffix(rules.iter().map(|rule| rule.id.as_str()), "rule-");
        self.next_id = self.next_id.max(loaded);
        self.rules = rules;
        self.selected = None;
        self.revalidate();
    }

    pub fn set_available_variables(&mut self, inputs: Vec<String>, outputs: Vec<String>) {
        if self.input_variables != inputs || self.output_variables != outputs {
            self.input_variables = inputs;
            self.output_variables = outputs;
            self.revalidate();
        }
    }

    pub fn set_available_fuzzy_sets(&mut self, ids: Vec<String>) {
        if self.fuzzy_set_ids != ids {
            self.fuzzy_set_ids = ids;
            self.revalidate();
        }
    }

    fn revalidate(&mut self) {
        let sets = &self.fuzzy_set_ids;
        self.validation_errors = self
            .rules
            .iter()
            .flat_map(|rule| {
                rule.validate(&self.input_variables, &self.output_variables, |id| {
                    sets.iter().any(|known| known == id)
                })
            })
            .collect();
    }
}

fn non_blank(name: &str) -> Option<&str> {
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}

/// Largest `N` among ids shaped `<prefix>N`, so new ids do not collide with loaded ones.
pub(crate) fn highest_suffix<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> u64 {
    ids.filter_map(|id| id.strip_prefix(prefix)?.parse().ok())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn rules_vm() -> RulesViewModel {
        let mut vm = RulesViewModel::new();
        vm.set_available_variables(strings(&["temperature"]), strings(&["heating"]));
        vm.set_available_fuzzy_sets(strings(&["set-1", "set-2"]));
        vm
    }

    #[test]
    fn test_create_select_update_remove() {
        let mut vm = rules_vm();
        let id = vm.create_rule(
            "cold",
            vec![Condition::new("temperature", "set-1")],
            Condition::new("heating", "set-2"),
            RuleOperator::And,
        );
        assert!(vm.validation_errors().is_empty());

        vm.select_rule(&id);
        assert_eq!(vm.selected().map(|r| r.name.as_str()), Some("cold"));

        let consequent = Condition::new("heating", "set-1");
        assert!(vm.update_rule(&id, "  ", Vec::new(), consequent, RuleOperator::Or));
        let rule = vm.selected().unwrap();
        assert_eq!(rule.name, "cold");
        assert_eq!(rule.operator, RuleOperator::Or);
        assert!(!vm.update_rule("rule-99", "x", Vec::new(), Condition::default(), RuleOperator::And));

        vm.remove_rule(&id);
        assert!(vm.selected().is_none());
        assert!(vm.rules().is_empty());
    }

    #[test]
    fn test_revalidates_when_sets_or_variables_change() {
        let mut vm = rules_vm();
        vm.create_rule(
            "r",
            vec![Condition::new("temperature", "set-1")],
            Condition::new("heating", "set-2"),
            RuleOperator::And,
        );
        assert!(vm.validation_errors().is_empty());

        vm.set_available_fuzzy_sets(strings(&["set-2"]));
        assert_eq!(vm.validation_errors(), ["Rule r: Fuzzy set 'set-1' not found"]);

        vm.set_available_variables(strings(&["temperature"]), Vec::new());
        assert_eq!(vm.validation_errors().len(), 2);

        vm.set_available_variables(strings(&["temperature"]), strings(&["heating"]));
        vm.set_available_fuzzy_sets(strings(&["set-1", "set-2"]));
        assert!(vm.validation_errors().is_empty());
    }

    #[test]
    fn test_replaced_rules_keep_ids_unique() {
        let mut vm = rules_vm();
        let loaded = FuzzyRule::new(
            "rule-7",
            "loaded",
            Vec::new(),
            Condition::new("heating", "set-1"),
            RuleOperator::And,
        );
        vm.replace_rules(vec![loaded]);

        let id = vm.create_rule("", Vec::new(), Condition::new("heating", "set-2"), RuleOperator::And);
        assert_eq!(id, "rule-8");
        assert_eq!(vm.rules()[1].name, "rule-8");
    }
}
