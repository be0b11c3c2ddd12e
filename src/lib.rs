//! # SQL Injection Guard
//!
//! Screens strings, lists and nested JSON-like mappings for text that looks
//! like SQL, so likely injection payloads can be rejected before they reach a
//! database layer.
//!
//! This crate provides:
//! - **Rules**: named keyword-pair heuristics (`select … from`, `drop … table`)
//!   that still match when a keyword is split by an inline comment (`dr/**/op`)
//! - **Validator**: a read-only depth-first walk that applies the rules to
//!   every string leaf and reports the first match as a [`Violation`]
//!
//! It is a textual screen, not a SQL parser: it neither rewrites input nor
//! guarantees the absence of false positives or negatives.
//!
//! ## Example
//!
//! ```
//! use sql_injection_guard::{scan_json, scan_string};
//! use serde_json::json;
//!
//! assert!(scan_string("SELECT * FROM users"));
//! assert!(!scan_string("hello from the other side"));
//!
//! let err = scan_json(&json!({"q": "dr/**/op table users"})).unwrap_err();
//! assert_eq!(err.key.as_deref(), Some("q"));
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod security;

pub use config::ScannerConfig;
pub use error::{RuleError, Violation};
pub use input::{Input, Mapping};
pub use security::{Rule, RuleSet, Validator};

use once_cell::sync::Lazy;

/// Validator behind the free functions: standard rules, default configuration.
static DEFAULT_VALIDATOR: Lazy<Validator> = Lazy::new(Validator::default);

/// Whether a string contains a suspected SQL construct.
pub fn scan_string(value: &str) -> bool {
    DEFAULT_VALIDATOR.validate_string(value)
}

/// Whether any direct string element of `items` contains a suspected SQL construct.
pub fn scan_list(items: &[Input]) -> bool {
    DEFAULT_VALIDATOR.validate_list(items)
}

/// Scan a nested mapping, failing on the first suspicious string.
pub fn scan_structure(data: &Mapping) -> Result<(), Violation> {
    DEFAULT_VALIDATOR.validate_mapping(data)
}

/// Scan a parsed JSON document of any shape.
pub fn scan_json(value: &serde_json::Value) -> Result<(), Violation> {
    DEFAULT_VALIDATOR.validate_json(value)
}
