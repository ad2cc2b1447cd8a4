//! Table Rules

use crate::dom::node::{attr, element_children, has_class, is_tag};
use crate::dom::{Document, NodeHandle};
use crate::profile::RuleSettings;
use crate::validation::engine::{Rule, ValidationResult};

pub const MISSING_DISPLAY_CLASS: &str = "A table does not contain '.display-lg'";
pub const MISSING_THEAD: &str = "A table does not contain the correct structure (missing <thead>)";
pub const MISSING_THEAD_ROW: &str =
    "A table does not contain the correct structure (missing <tr> within <thead>)";
pub const MISSING_COLUMN_HEADER: &str =
    "A table does not contain the correct structure (missing <th scope='col'> within <thead>)";

/// One finding per table without the display class
pub struct TableDisplayClass;

impl Rule for TableDisplayClass {
    fn name(&self) -> &'static str {
        "table-display-class"
    }

    fn check(&self, doc: &Document, settings: &RuleSettings, result: &mut ValidationResult) {
        for table in doc.elements_by_tag("table") {
            if !has_class(&table, &settings.table_display_class) {
                result.add(MISSING_DISPLAY_CLASS);
            }
        }
    }
}

/// `table > thead > tr > th[scope=col]`, checked outside-in. Only the first
/// missing level is reported for each table.
pub struct TableStructure;

/// First structural problem of a table, if any
pub fn table_structure_problem(table: &NodeHandle) -> Option<&'static str> {
    let Some(thead) = first_child_tag(table, "thead") else {
        return Some(MISSING_THEAD);
    };
    let Some(row) = first_child_tag(&thead, "tr") else {
        return Some(MISSING_THEAD_ROW);
    };
    let has_column_header = element_children(&row)
        .iter()
        .any(|cell| is_tag(cell, "th") && attr(cell, "scope").as_deref() == Some("col"));
    if has_column_header {
        None
    } else {
        Some(MISSING_COLUMN_HEADER)
    }
}

fn first_child_tag(node: &NodeHandle, tag: &str) -> Option<NodeHandle> {
    element_children(node).into_iter().find(|child| is_tag(child, tag))
}

impl Rule for TableStructure {
    fn name(&self) -> &'static str {
        "table-structure"
    }

    fn check(&self, doc: &Document, _settings: &RuleSettings, result: &mut ValidationResult) {
        for table in doc.elements_by_tag("table") {
            if let Some(problem) = table_structure_problem(&table) {
                result.add(problem);
            }
        }
    }
}
