//! Audit Pipeline
//!
//! Per document: parse, normalize in place, then validate the cleaned tree.
//! Documents are independent and run on blocking workers; the only shared
//! state is the diagnostic collector.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::diagnostics::DiagnosticCollector;
use crate::core::document::{
    copy_asset, read_page, write_output, SourceFile, SourceTree,
};
use crate::dom::{self, Document};
use crate::normalize::{normalize_document, CleanOptions, NormalizeReport};
use crate::profile::{RuleProfile, RuleSettings};
use crate::validation::{RuleSet, ValidationResult};

/// Result of running one document through the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedDocument {
    pub file_path: String,
    /// Normalized markup
    pub html: String,
    /// Diagnostics in evaluation order
    pub messages: Vec<String>,
    pub report: NormalizeReport,
}

/// A file that could not be processed; the rest of the batch carries on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub documents: Vec<ProcessedDocument>,
    pub failures: Vec<FileFailure>,
}

impl BatchOutcome {
    pub fn diagnostic_count(&self) -> usize {
        self.documents.iter().map(|d| d.messages.len()).sum()
    }
}

/// Totals of a `clean` run
#[derive(Debug, Default)]
pub struct CleanSummary {
    pub pages_written: usize,
    pub assets_copied: usize,
    pub diagnostics: usize,
    pub failures: Vec<FileFailure>,
}

/// Shared, cheaply clonable pipeline state
#[derive(Clone)]
pub struct Pipeline {
    settings: Arc<RuleSettings>,
    rules: Arc<RuleSet>,
    options: Arc<CleanOptions>,
    collector: Arc<DiagnosticCollector>,
}

impl Pipeline {
    /// Pipeline using the profile's rules and cleaning settings
    pub fn new(profile: &RuleProfile) -> Self {
        let options =
            CleanOptions::from_settings(&profile.cleaning, &profile.rules.table_display_class);
        Self::with_options(profile, options)
    }

    pub fn with_options(profile: &RuleProfile, options: CleanOptions) -> Self {
        Self::with_rules(profile, options, RuleSet::for_settings(&profile.rules))
    }

    /// Pipeline running `rules` instead of the profile's catalogue
    pub fn with_rules(profile: &RuleProfile, options: CleanOptions, rules: RuleSet) -> Self {
        Self {
            settings: Arc::new(profile.rules.clone()),
            rules: Arc::new(rules),
            options: Arc::new(options),
            collector: Arc::new(DiagnosticCollector::new()),
        }
    }

    pub fn collector(&self) -> &DiagnosticCollector {
        &self.collector
    }

    pub fn options(&self) -> &CleanOptions {
        &self.options
    }

    /// Normalize `doc` in place, then validate it. Findings are recorded in
    /// the collector and returned.
    pub fn process_document(
        &self,
        file_path: &str,
        doc: &Document,
    ) -> (NormalizeReport, ValidationResult) {
        let report = normalize_document(doc, &self.options);
        let result = self.rules.validate(file_path, doc, &self.settings);
        self.collector.extend(file_path, result.messages.iter().cloned());
        log::debug!(
            "{}: {} diagnostic(s), {} attribute(s) stripped, \
             {} element(s) pruned, {} wrapper(s) collapsed",
            file_path,
            result.len(),
            report.attributes.attributes_removed,
            report.pruning.removed,
            report.pruning.collapsed
        );
        (report, result)
    }

    /// Parse, process and serialize one page
    pub fn process_source(&self, file_path: &str, html: &str) -> ProcessedDocument {
        let doc = dom::parse(html);
        let (report, result) = self.process_document(file_path, &doc);
        ProcessedDocument {
            file_path: file_path.to_string(),
            html: doc.to_html(),
            messages: result.messages,
            report,
        }
    }

    /// Process `(file path, markup)` pairs, one blocking worker per document.
    /// Documents come back in input order; a worker that dies becomes a
    /// `FileFailure` for its file only.
    pub async fn run_batch(&self, inputs: Vec<(String, String)>) -> BatchOutcome {
        let handles: Vec<_> = inputs
            .into_iter()
            .map(|(file_path, html)| {
                let pipeline = self.clone();
                let path = file_path.clone();
                let handle =
                    tokio::task::spawn_blocking(move || pipeline.process_source(&path, &html));
                (file_path, handle)
            })
            .collect();

        let mut outcome = BatchOutcome::default();
        for (file_path, handle) in handles {
            match handle.await {
                Ok(document) => outcome.documents.push(document),
                Err(e) => {
                    log::error!("Processing failed for {}: {}", file_path, e);
                    outcome.failures.push(FileFailure {
                        file_path,
                        error: e.to_string(),
                    });
                }
            }
        }

        log::info!(
            "Processed {} document(s), {} diagnostic(s), {} failure(s)",
            outcome.documents.len(),
            outcome.diagnostic_count(),
            outcome.failures.len()
        );
        outcome
    }

    /// Read every page of `tree`; unreadable pages become failures
    async fn read_pages<'a>(
        &self,
        tree: &'a SourceTree,
    ) -> (Vec<(&'a SourceFile, String)>, Vec<FileFailure>) {
        let mut pages = Vec::with_capacity(tree.pages.len());
        let mut failures = Vec::new();
        for page in &tree.pages {
            match read_page(page).await {
                Ok(html) => pages.push((page, html)),
                Err(e) => {
                    log::error!("{:#}", e);
                    failures.push(FileFailure {
                        file_path: page.display_path(),
                        error: format!("{:#}", e),
                    });
                }
            }
        }
        (pages, failures)
    }

    /// Audit every page under `tree`
    pub async fn audit_tree(&self, tree: &SourceTree) -> BatchOutcome {
        let (pages, read_failures) = self.read_pages(tree).await;
        let inputs = pages
            .into_iter()
            .map(|(page, html)| (page.display_path(), html))
            .collect();
        let mut outcome = self.run_batch(inputs).await;
        let mut failures = read_failures;
        failures.append(&mut outcome.failures);
        outcome.failures = failures;
        outcome
    }

    /// Normalize every page under `tree` into `output`, optionally copying
    /// the non-HTML assets alongside
    pub async fn clean_tree(
        &self,
        tree: &SourceTree,
        output: &Path,
        copy_assets: bool,
    ) -> CleanSummary {
        let (pages, read_failures) = self.read_pages(tree).await;
        let relative_paths: HashMap<String, PathBuf> = pages
            .iter()
            .map(|(page, _)| (page.display_path(), page.relative.clone()))
            .collect();
        let inputs = pages
            .into_iter()
            .map(|(page, html)| (page.display_path(), html))
            .collect();
        let outcome = self.run_batch(inputs).await;

        let mut summary = CleanSummary {
            diagnostics: outcome.diagnostic_count(),
            failures: read_failures,
            ..Default::default()
        };
        summary.failures.extend(outcome.failures);

        for document in &outcome.documents {
            let Some(relative) = relative_paths.get(&document.file_path) else {
                continue;
            };
            match write_output(output, relative, &document.html).await {
                Ok(target) => {
                    log::debug!("Wrote {}", target.display());
                    summary.pages_written += 1;
                }
                Err(e) => {
                    log::error!("{:#}", e);
                    summary.failures.push(FileFailure {
                        file_path: document.file_path.clone(),
                        error: format!("{:#}", e),
                    });
                }
            }
        }

        if copy_assets {
            for asset in &tree.assets {
                match copy_asset(asset, output).await {
                    Ok(_) => summary.assets_copied += 1,
                    Err(e) => {
                        log::error!("{:#}", e);
                        summary.failures.push(FileFailure {
                            file_path: asset.display_path(),
                            error: format!("{:#}", e),
                        });
                    }
                }
            }
        }

        log::info!(
            "Cleaned {} page(s) into {}, copied {} asset(s), {} failure(s)",
            summary.pages_written,
            output.display(),
            summary.assets_copied,
            summary.failures.len()
        );
        summary
    }
}
