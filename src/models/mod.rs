//! Domain models for the demo views.
//!
//! Models hold plain data and the rules over it; they know nothing about
//! egui, threads or translation.

pub mod counter;
pub mod fuzzy;

pub use counter::{CounterError, CounterModel, MAX_COUNT, MIN_COUNT};
pub use fuzzy::{
    Condition, EvaluationError, FuzzyRule, FuzzySet, FuzzySystem, MembershipFunction, RuleOperator,
    Universe,
};
