//! Input fields of the rule editor and the fuzzy system panel.

use std::collections::BTreeMap;

use rmvvm::models::{Condition, FuzzyRule, RuleOperator};

/// The rule being composed, or a copy of the selected rule being edited.
#[derive(Debug, Clone, Default)]
pub struct RuleFormState {
    pub name: String,
    pub antecedent: Vec<Condition>,
    pub consequent: Condition,
    pub operator: RuleOperator,
}

impl RuleFormState {
    /// Copies `rule` into the form for editing.
    pub fn load(&mut self, rule: &FuzzyRule) {
        self.name = rule.name.clone();
        self.antecedent = rule.antecedent.clone();
        self.consequent = rule.consequent.clone();
        self.operator = rule.operator;
    }

    pub fn add_condition(&mut self) {
        self.antecedent.push(Condition::default());
    }

    pub fn remove_condition(&mut self, index: usize) {
        if index < self.antecedent.len() {
            self.antecedent.remove(index);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default)]
pub struct SystemFormState {
    pub name: String,
    pub description: String,
    pub new_input: String,
    pub new_output: String,
    /// Crisp values typed in for each input variable.
    pub inputs: BTreeMap<String, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_and_edit_conditions() {
        let rule = FuzzyRule::new(
            "rule-1",
            "cold",
            vec![Condition::new("temperature", "set-1")],
            Condition::new("heating", "set-2"),
            RuleOperator::Or,
        );
        let mut form = RuleFormState::default();
        form.load(&rule);
        assert_eq!(form.operator, RuleOperator::Or);

        form.add_condition();
        assert_eq!(form.antecedent.len(), 2);
        form.remove_condition(5);
        form.remove_condition(0);
        assert_eq!(form.antecedent, vec![Condition::default()]);

        form.clear();
        assert!(form.name.is_empty() && form.antecedent.is_empty());
    }
}
