//! HTML Audit
//!
//! Audits and normalizes batches of HTML pages against a fixed catalogue of
//! structural and accessibility rules.
//!
//! This library provides:
//! - A thin document model over html5ever
//! - Validation rules with per-file diagnostics
//! - Attribute normalization and fixed-point pruning
//! - Rule profiles and configuration management

pub mod config;
pub mod core;
pub mod dom;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod validation;

pub use config::Config;
pub use crate::core::{Diagnostic, DiagnosticCollector};
pub use dom::{parse, Document};
pub use normalize::{normalize_document, CleanOptions, FixedPointPruner};
pub use pipeline::Pipeline;
pub use profile::RuleProfile;
pub use validation::{validate_document, ValidationResult};
