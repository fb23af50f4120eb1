//! Fuzzy sets with the three classic membership function shapes, and the
//! rules and systems built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shape of a fuzzy set's membership function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MembershipFunction {
    Triangular { a: f64, b: f64, c: f64 },
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    Gaussian { center: f64, sigma: f64 },
}

impl MembershipFunction {
    pub fn kind(&self) -> &'static str {
        match self {
            MembershipFunction::Triangular { .. } => "triangular",
            MembershipFunction::Trapezoidal { .. } => "trapezoidal",
            MembershipFunction::Gaussian { .. } => "gaussian",
        }
    }

    /// Degree of membership of `x`, in `[0, 1]`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let degree = match *self {
            MembershipFunction::Triangular { a, b, c } => {
                if x == b {
                    1.0
                } else if x <= a || x >= c {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            }
            MembershipFunction::Trapezoidal { a, b, c, d } => {
                if (b..=c).contains(&x) {
                    1.0
                } else if x <= a || x >= d {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            }
            MembershipFunction::Gaussian { center, sigma } => {
                if sigma <= 0.0 {
                    return if x == center { 1.0 } else { 0.0 };
                }
                let z = (x - center) / sigma;
                (-0.5 * z * z).exp()
            }
        };
        if degree.is_nan() {
            0.0
        } else {
            degree.clamp(0.0, 1.0)
        }
    }

    /// Parameter ordering problems, empty when the shape is well formed.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        match *self {
            MembershipFunction::Triangular { a, b, c } => {
                if !non_decreasing(&[a, b, c]) {
                    problems.push("parameters must be a ≤ b ≤ c".to_string());
                }
            }
            MembershipFunction::Trapezoidal { a, b, c, d } => {
                if !non_decreasing(&[a, b, c, d]) {
                    problems.push("parameters must be a ≤ b ≤ c ≤ d".to_string());
                }
            }
            MembershipFunction::Gaussian { sigma, center } => {
                if sigma.is_nan() || sigma <= 0.0 {
                    problems.push("sigma must be positive".to_string());
                }
                if center.is_nan() {
                    problems.push("center must be a number".to_string());
                }
            }
        }
        problems
    }
}

/// NaN compares false both ways, so it is rejected explicitly.
fn non_decreasing(values: &[f64]) -> bool {
    values.iter().all(|v| !v.is_nan()) && values.windows(2).all(|pair| pair[0] <= pair[1])
}

/// Domain a fuzzy set is defined over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    pub min: f64,
    pub max: f64,
}

impl Default for Universe {
    fn default() -> Self {
        Self { min: 0.0, max: 100.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzySet {
    pub id: String,
    pub name: String,
    pub function: MembershipFunction,
    pub universe: Universe,
}

impl FuzzySet {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        function: MembershipFunction,
        universe: Universe,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            function,
            universe,
        }
    }

    /// Membership of `x`; zero outside the universe.
    pub fn membership(&self, x: f64) -> f64 {
        if x < self.universe.min || x > self.universe.max {
            return 0.0;
        }
        self.function.evaluate(x)
    }

    /// Human-readable problems with this set, each prefixed by its name.
    pub fn validate(&self) -> Vec<String> {
        let mut problems: Vec<String> = self
            .function
            .validate()
            .into_iter()
            .map(|p| format!("{} fuzzy set '{}': {}", self.function.kind(), self.name, p))
            .collect();
        let Universe { min, max } = self.universe;
        if min.is_nan() || max.is_nan() || min >= max {
            problems.push(format!(
                "fuzzy set '{}': universe minimum must be below its maximum",
                self.name
            ));
        }
        problems
    }

    /// Evenly spaced `(x, membership)` samples across the universe.
    pub fn sample(&self, points: usize) -> Vec<(f64, f64)> {
        if points < 2 {
            return Vec::new();
        }
        let span = self.universe.max - self.universe.min;
        (0..points)
            .map(|i| {
                let x = self.universe.min + span * i as f64 / (points - 1) as f64;
                (x, self.membership(x))
            })
            .collect()
    }
}

/// How the conditions of a rule's antecedent are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleOperator {
    /// Minimum of the condition degrees.
    #[default]
    And,
    /// Maximum of the condition degrees.
    Or,
}

impl RuleOperator {
    pub fn label(self) -> &'static str {
        match self {
            RuleOperator::And => "AND",
            RuleOperator::Or => "OR",
        }
    }

    fn combine(self, degrees: impl IntoIterator<Item = f64>) -> f64 {
        let mut degrees = degrees.into_iter().peekable();
        if degrees.peek().is_none() {
            return 0.0;
        }
        match self {
            RuleOperator::And => degrees.fold(1.0, f64::min),
            RuleOperator::Or => degrees.fold(0.0, f64::max),
        }
    }
}

/// `variable IS fuzzy_set`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub variable: String,
    pub fuzzy_set_id: String,
}

impl Condition {
    pub fn new(variable: impl Into<String>, fuzzy_set_id: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            fuzzy_set_id: fuzzy_set_id.into(),
        }
    }
}

/// `IF <antecedent> THEN <consequent>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyRule {
    pub id: String,
    pub name: String,
    pub antecedent: Vec<Condition>,
    pub consequent: Condition,
    #[serde(default)]
    pub operator: RuleOperator,
}

impl FuzzyRule {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        antecedent: Vec<Condition>,
        consequent: Condition,
        operator: RuleOperator,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            antecedent,
            consequent,
            operator,
        }
    }

    /// Problems with the rule's references, each prefixed by the rule name.
    ///
    /// Antecedent variables must be inputs, the consequent variable an output,
    /// and every set id must satisfy `has_set`.
    pub fn validate(
        &self,
        inputs: &[String],
        outputs: &[String],
        has_set: impl Fn(&str) -> bool,
    ) -> Vec<String> {
        let mut problems = Vec::new();
        let mut check = |condition: &Condition, side: &str, allowed: &[String], kind: &str| {
            if condition.variable.is_empty() {
                problems.push(format!("Rule {}: Missing variable in {side}", self.name));
            } else if !allowed.contains(&condition.variable) {
                problems.push(format!(
                    "Rule {}: Variable '{}' not in {kind} variables",
                    self.name, condition.variable
                ));
            }
            if condition.fuzzy_set_id.is_empty() {
                problems.push(format!("Rule {}: Missing fuzzy set ID in {side}", self.name));
            } else if !has_set(&condition.fuzzy_set_id) {
                problems.push(format!(
                    "Rule {}: Fuzzy set '{}' not found",
                    self.name, condition.fuzzy_set_id
                ));
            }
        };
        for condition in &self.antecedent {
            check(condition, "antecedent", inputs, "input");
        }
        check(&self.consequent, "consequent", outputs, "output");
        problems
    }

    /// Degree to which the antecedent holds for `inputs`. Unknown sets and
    /// missing inputs count as zero membership.
    pub fn firing_strength(&self, inputs: &BTreeMap<String, f64>, sets: &[FuzzySet]) -> f64 {
        self.operator.combine(self.antecedent.iter().map(|condition| {
            let set = sets.iter().find(|set| set.id == condition.fuzzy_set_id);
            match (set, inputs.get(&condition.variable)) {
                (Some(set), Some(&x)) => set.membership(x),
                _ => 0.0,
            }
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("Missing input variable: {0}")]
    MissingInput(String),
}

/// Samples per output universe when defuzzifying.
pub const DEFUZZIFY_SAMPLES: usize = 201;

/// Named input/output variables, the sets they range over, and the rules
/// linking them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzySystem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub input_variables: Vec<String>,
    pub output_variables: Vec<String>,
    pub fuzzy_sets: Vec<FuzzySet>,
    pub rules: Vec<FuzzyRule>,
}

impl FuzzySystem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn fuzzy_set(&self, id: &str) -> Option<&FuzzySet> {
        self.fuzzy_sets.iter().find(|set| set.id == id)
    }

    /// Adds an input variable; returns false if it was blank or already present.
    pub fn add_input_variable(&mut self, variable: &str) -> bool {
        push_unique(&mut self.input_variables, variable)
    }

    /// Adds an output variable; returns false if it was blank or already present.
    pub fn add_output_variable(&mut self, variable: &str) -> bool {
        push_unique(&mut self.output_variables, variable)
    }

    /// Everything that keeps the system from being evaluated, empty when valid.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.input_variables.is_empty() {
            problems.push("System must have at least one input variable".to_string());
        }
        if self.output_variables.is_empty() {
            problems.push("System must have at least one output variable".to_string());
        }
        if self.fuzzy_sets.is_empty() {
            problems.push("System must have at least one fuzzy set".to_string());
        }
        if self.rules.is_empty() {
            problems.push("System must have at least one rule".to_string());
        }
        for rule in &self.rules {
            problems.extend(rule.validate(&self.input_variables, &self.output_variables, |id| {
                self.fuzzy_set(id).is_some()
            }));
        }
        problems
    }

    /// Mamdani inference with centroid defuzzification.
    ///
    /// Each rule clips its consequent set at its firing strength; clipped sets
    /// of one output are combined with max and reduced to their centroid.
    /// Outputs that no rule fires for are left out of the result.
    pub fn evaluate(
        &self,
        inputs: &BTreeMap<String, f64>,
    ) -> Result<BTreeMap<String, f64>, EvaluationError> {
        if let Some(missing) = self.input_variables.iter().find(|v| !inputs.contains_key(*v)) {
            return Err(EvaluationError::MissingInput(missing.clone()));
        }

        let mut results = BTreeMap::new();
        for output in &self.output_variables {
            let activations: Vec<(&FuzzySet, f64)> = self
                .rules
                .iter()
                .filter(|rule| &rule.consequent.variable == output)
                .filter_map(|rule| {
                    let set = self.fuzzy_set(&rule.consequent.fuzzy_set_id)?;
                    let strength = rule.firing_strength(inputs, &self.fuzzy_sets);
                    (strength > 0.0).then_some((set, strength))
                })
                .collect();
            if let Some(value) = centroid(&activations) {
                results.insert(output.clone(), value);
            }
        }
        Ok(results)
    }
}

fn push_unique(variables: &mut Vec<String>, variable: &str) -> bool {
    let variable = variable.trim();
    if variable.is_empty() || variables.iter().any(|v| v == variable) {
        return false;
    }
    variables.push(variable.to_string());
    true
}

fn centroid(activations: &[(&FuzzySet, f64)]) -> Option<f64> {
    let min = activations.iter().map(|(set, _)| set.universe.min).reduce(f64::min)?;
    let max = activations.iter().map(|(set, _)| set.universe.max).reduce(f64::max)?;
    if min >= max {
        return Some(min);
    }

    let step = (max - min) / (DEFUZZIFY_SAMPLES - 1) as f64;
    let (weighted, total) = (0..DEFUZZIFY_SAMPLES)
        .map(|i| {
            let y = min + step * i as f64;
            let degree = activations
                .iter()
                .map(|(set, strength)| set.membership(y).min(*strength))
                .fold(0.0, f64::max);
            (y * degree, degree)
        })
        .fold((0.0, 0.0), |(w, t), (wy, d)| (w + wy, t + d));
    (total > 0.0).then(|| weighted / total)
}
