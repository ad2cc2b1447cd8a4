//! Validation Engine
//!
//! Runs the rule catalogue over a parsed document. Rules only read the tree;
//! their findings go into a per-document `ValidationResult`.

use crate::dom::Document;
use crate::profile::RuleSettings;

use super::rules;

/// Findings for one document, in evaluation order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    pub file_path: String,
    pub messages: Vec<String>,
}

impl ValidationResult {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            messages: Vec::new(),
        }
    }

    pub fn add(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn is_clean(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of times `message` was reported
    pub fn count(&self, message: &str) -> usize {
        self.messages.iter().filter(|m| m.as_str() == message).count()
    }
}

/// A read-only structural check
pub trait Rule: Send + Sync {
    /// Stable name, used by `disabled_rules`
    fn name(&self) -> &'static str;

    fn check(&self, doc: &Document, settings: &RuleSettings, result: &mut ValidationResult);
}

/// An ordered set of rules. Order only affects the order of messages.
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet {
    /// Every rule of the catalogue, in reporting order
    pub fn standard() -> Self {
        Self {
            rules: rules::standard_rules(),
        }
    }

    pub fn from_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// The standard set minus whatever `settings.disabled_rules` names
    pub fn for_settings(settings: &RuleSettings) -> Self {
        let standard = Self::standard();
        for disabled in &settings.disabled_rules {
            if !standard
                .rules
                .iter()
                .any(|r| r.name().eq_ignore_ascii_case(disabled))
            {
                log::warn!("Unknown rule '{}' in disabled_rules", disabled);
            }
        }
        Self {
            rules: standard
                .rules
                .into_iter()
                .filter(|r| !settings.is_disabled(r.name()))
                .collect(),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule against `doc`
    pub fn validate(
        &self,
        file_path: &str,
        doc: &Document,
        settings: &RuleSettings,
    ) -> ValidationResult {
        let mut result = ValidationResult::new(file_path);
        for rule in &self.rules {
            rule.check(doc, settings, &mut result);
        }
        result
    }
}

/// Validate a document with the rule set implied by `settings`
pub fn validate_document(
    file_path: &str,
    doc: &Document,
    settings: &RuleSettings,
) -> ValidationResult {
    RuleSet::for_settings(settings).validate(file_path, doc, settings)
}
