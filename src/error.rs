//! Error types for the SQL injection guard.
//!
//! [`Violation`] is the single scan failure: a string somewhere in the input
//! looked like SQL. [`RuleError`] only arises when building custom rules.

use crate::constants::{INJECTION_MESSAGE, MISSING_FIELD};
use serde::Serialize;
use thiserror::Error;

/// A suspected SQL injection found while scanning input.
///
/// Displays as `<message>, found in key: <key>, offending value: <value>`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error(
    "{message}, found in key: {}, offending value: {}",
    .key.as_deref().unwrap_or(MISSING_FIELD),
    .value.as_deref().unwrap_or(MISSING_FIELD)
)]
pub struct Violation {
    /// Human-readable message
    pub message: String,

    /// Mapping key directly holding the offending value (or list)
    pub key: Option<String>,

    /// The exact offending string
    pub value: Option<String>,

    /// Extra context, typically the rule that fired
    pub description: Option<String>,

    /// Full structural location, e.g. `user.tags[2]`
    pub path: Option<String>,
}

impl Violation {
    /// Create an injection violation for an offending value.
    pub fn injection(key: Option<&str>, value: impl Into<String>) -> Self {
        Self {
            message: INJECTION_MESSAGE.to_string(),
            key: key.map(str::to_string),
            value: Some(value.into()),
            description: None,
            path: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach the structural path of the offending value.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Get a user-friendly suggestion for callers reporting this violation.
    pub fn suggestion(&self) -> &'static str {
        "Use parameterized queries instead of string concatenation"
    }
}

/// Errors raised while building a custom rule set.
#[derive(Debug, Error)]
pub enum RuleError {
    /// Rule name is empty
    #[error("Rule name cannot be empty")]
    EmptyName,

    /// Rule has no leading keyword
    #[error("Rule '{0}' needs at least one leading keyword")]
    NoLeadingKeywords(String),

    /// A keyword in the rule is empty
    #[error("Rule '{0}' contains an empty keyword")]
    EmptyKeyword(String),

    /// Two rules share a name
    #[error("Duplicate rule name: {0}")]
    DuplicateRule(String),

    /// Generated pattern failed to compile
    #[error("Rule '{rule}' produced an invalid pattern: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },
}
