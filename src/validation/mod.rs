//! Validation Engine
//!
//! Clean separation of the rule catalogue from parsing and cleaning concerns.

pub mod engine;
pub mod rules;

pub use engine::{validate_document, Rule, RuleSet, ValidationResult};
