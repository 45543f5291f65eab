//! Errors produced by form validation and the mutation pipeline.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// One failing field and why it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

/// The submitted form did not match the schema.
///
/// Carries one [`FieldIssue`] per failing field so a form can show each
/// message next to its input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("invalid form: {}", summarise(.issues))]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

fn summarise(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.field, i.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    /// A validation error for a single field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldIssue { field: field.into(), message: message.into() }])
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Messages grouped by field name.
    pub fn field_errors(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for issue in &self.issues {
            grouped
                .entry(issue.field.as_str())
                .or_default()
                .push(issue.message.as_str());
        }
        grouped
    }

    /// Whether `field` has at least one issue.
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

/// Errors returned by the create / update / delete operations.
#[derive(Debug, Error)]
pub enum MutationError {
    /// The form failed validation; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store rejected the statement.  Not retried.
    #[error("persistence failed: {0}")]
    Persistence(#[from] db::DbError),
}
