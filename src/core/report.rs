//! Report Rendering
//!
//! Text and JSON renderings of a run's diagnostics.

use std::collections::BTreeMap;

use anyhow::{Context, Result};

use super::diagnostics::Diagnostic;

const SEPARATOR: &str = "--------------------------------------------------";

/// Enumerated text report, one block per file with diagnostics:
///
/// ```text
/// 1. Errors in file pages/intro.html:
///  > Missing <!DOCTYPE html>
/// --------------------------------------------------
/// ```
pub fn render_text(files: &BTreeMap<String, Vec<Diagnostic>>) -> String {
    let mut out = String::new();
    let mut count = 1;
    for (path, diagnostics) in files {
        if diagnostics.is_empty() {
            continue;
        }
        out.push_str(&format!("{}. Errors in file {}:\n", count, path));
        for diagnostic in diagnostics {
            out.push_str(&format!(" > {}\n", diagnostic.message));
        }
        out.push_str(SEPARATOR);
        out.push('\n');
        count += 1;
    }
    out
}

/// `{ "<path>": ["message", ...] }`
pub fn render_json(files: &BTreeMap<String, Vec<Diagnostic>>) -> Result<String> {
    let messages: BTreeMap<&str, Vec<&str>> = files
        .iter()
        .filter(|(_, diagnostics)| !diagnostics.is_empty())
        .map(|(path, diagnostics)| {
            (
                path.as_str(),
                diagnostics.iter().map(|d| d.message.as_str()).collect(),
            )
        })
        .collect();
    serde_json::to_string_pretty(&messages).context("Failed to encode JSON report")
}
