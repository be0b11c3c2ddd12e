//! Named SQL heuristics and the rule registry.
//!
//! A rule fires when one of its leading keywords is followed, anywhere later
//! in the value, by one of its trailing keywords. A keyword on its own (say
//! "from" in an English sentence) is not suspicious; the ordered pair is.

use super::keywords::keyword_cluster;
use crate::constants::KEYWORD_GAP_PATTERN;
use crate::error::RuleError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// Standard rules as `(name, leading keywords, trailing keywords)`.
///
/// An empty trailing list makes the leading keyword suspicious on its own.
const STANDARD_DEFINITIONS: &[(&str, &[&str], &[&str])] = &[
    ("select", &["select"], &["from"]),
    ("case", &["select"], &["case"]),
    ("create", &["create"], &["table"]),
    ("delete", &["delete"], &["from"]),
    (
        "drop",
        &["drop"],
        &[
            "table",
            "function",
            "index",
            "procedure",
            "role",
            "schema",
            "sequence",
            "synonym",
            "trigger",
            "type",
            "view",
            "user",
        ],
    ),
    ("insert", &["insert"], &["into"]),
    ("alter", &["alter"], &["table", "user"]),
    ("truncate", &["truncate"], &["table", "cluster"]),
    ("into", &["select", "merge"], &["into"]),
    ("update", &["update"], &["from"]),
    ("execute", &["exec", "execute"], &["immediate"]),
    ("declare", &["declare"], &["begin", "end"]),
    ("begin", &["begin"], &["end"]),
    ("sys_context", &["sys_context"], &[]),
    ("describe", &["describe", "desc"], &["table"]),
];

/// Standard rule set, compiled once at first use.
///
/// Definitions are hardcoded constants covered by tests, so compilation
/// cannot fail in practice.
static STANDARD_RULES: Lazy<Arc<RuleSet>> = Lazy::new(|| {
    let rules = STANDARD_DEFINITIONS
        .iter()
        .map(|(name, leading, trailing)| {
            Rule::new(*name, leading, trailing).unwrap_or_else(|e| {
                panic!("Internal error: invalid standard rule '{}': {}", name, e)
            })
        })
        .collect();

    Arc::new(RuleSet { rules })
});

/// A named heuristic pairing two SQL keyword clusters.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    leading: Vec<String>,
    trailing: Vec<String>,
    matcher: Regex,
}

impl Rule {
    /// Build a rule from its keyword clusters.
    ///
    /// Keywords are lowercased. Pass an empty `trailing` slice for a rule
    /// that fires on a leading keyword alone.
    pub fn new(
        name: impl Into<String>,
        leading: &[&str],
        trailing: &[&str],
    ) -> Result<Self, RuleError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RuleError::EmptyName);
        }
        if leading.is_empty() {
            return Err(RuleError::NoLeadingKeywords(name));
        }
        if leading.iter().chain(trailing).any(|k| k.is_empty()) {
            return Err(RuleError::EmptyKeyword(name));
        }

        // (?s): comment bodies and the keyword gap may span lines
        let pattern = if trailing.is_empty() {
            format!("(?s){}", keyword_cluster(leading))
        } else {
            format!(
                "(?s){}{}{}",
                keyword_cluster(leading),
                KEYWORD_GAP_PATTERN,
                keyword_cluster(trailing)
            )
        };

        let matcher = Regex::new(&pattern).map_err(|source| RuleError::InvalidPattern {
            rule: name.clone(),
            source,
        })?;

        Ok(Self {
            name,
            leading: leading.iter().map(|k| k.to_lowercase()).collect(),
            trailing: trailing.iter().map(|k| k.to_lowercase()).collect(),
            matcher,
        })
    }

    /// Rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keywords that must appear first.
    pub fn leading(&self) -> &[String] {
        &self.leading
    }

    /// Keywords that must follow a leading keyword. Empty for single-keyword rules.
    pub fn trailing(&self) -> &[String] {
        &self.trailing
    }

    /// Check an already lowercased value.
    fn matches_folded(&self, folded: &str) -> bool {
        self.matcher.is_match(folded)
    }

    /// Check a value, case-insensitively.
    pub fn is_match(&self, value: &str) -> bool {
        !value.is_empty() && self.matches_folded(&value.to_lowercase())
    }
}

/// Ordered registry of rules with unique names.
///
/// Immutable once built; share it through an `Arc`.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build a custom rule set. Order is kept; names must be unique.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleError> {
        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].iter().any(|r| r.name == rule.name) {
                return Err(RuleError::DuplicateRule(rule.name.clone()));
            }
        }
        Ok(Self { rules })
    }

    /// The shared standard rule set.
    pub fn standard() -> Arc<RuleSet> {
        Arc::clone(&STANDARD_RULES)
    }

    /// Look a rule up by name.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Iterate rules in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule matching `value`, in evaluation order.
    pub fn find_match(&self, value: &str) -> Option<&Rule> {
        if value.is_empty() {
            return None;
        }

        let folded = value.to_lowercase();
        let rule = self.rules.iter().find(|r| r.matches_folded(&folded))?;
        debug!("SQL rule '{}' matched", rule.name);
        Some(rule)
    }

    /// Whether any rule matches `value`.
    pub fn is_match(&self, value: &str) -> bool {
        self.find_match(value).is_some()
    }
}
