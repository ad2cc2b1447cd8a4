//! Core Plumbing
//!
//! Diagnostic collection, report rendering and source file handling.

pub mod diagnostics;
pub mod document;
pub mod report;

pub use diagnostics::{Diagnostic, DiagnosticCollector};
pub use document::{SourceFile, SourceTree};
