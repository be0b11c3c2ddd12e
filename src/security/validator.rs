//! Structural validation of nested input.
//!
//! The validator walks a value depth-first over a shared borrow, applies the
//! rule set to every string leaf it reaches, and stops at the first match.
//! Mapping entries are visited in insertion order and list elements in index
//! order, so the reported violation is deterministic.

use super::rules::{Rule, RuleSet};
use crate::config::ScannerConfig;
use crate::constants::MAX_LOGGED_VALUE_LEN;
use crate::error::Violation;
use crate::input::{Input, Mapping};
use std::fmt::Write;
use std::sync::Arc;
use tracing::{debug, warn};

/// One step on the way from the root to a leaf.
#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

/// Applies a rule set to scalars, lists and nested mappings.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: Arc<RuleSet>,
    config: ScannerConfig,
}

impl Validator {
    /// Create a validator over `rules`.
    pub fn new(rules: Arc<RuleSet>, config: ScannerConfig) -> Self {
        Self { rules, config }
    }

    /// Standard rules with configuration read from the environment.
    pub fn from_env() -> Self {
        Self::new(RuleSet::standard(), ScannerConfig::from_env())
    }

    /// The rule set in use.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The active configuration.
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Whether a single string looks like SQL.
    pub fn validate_string(&self, value: &str) -> bool {
        self.config.enabled && self.rules.is_match(value)
    }

    /// Whether any direct string element of `items` looks like SQL.
    ///
    /// Shallow: nested lists and mappings are not inspected.
    pub fn validate_list(&self, items: &[Input]) -> bool {
        items
            .iter()
            .filter_map(Input::as_str)
            .any(|s| self.validate_string(s))
    }

    /// Walk a mapping and fail on the first suspicious string.
    ///
    /// Violations in nested mappings propagate to the caller. Empty nested
    /// mappings are clean.
    pub fn validate_mapping(&self, data: &Mapping) -> Result<(), Violation> {
        if !self.config.enabled {
            debug!("SQL injection scanning disabled, skipping mapping");
            return Ok(());
        }
        self.walk_mapping(data, &mut Vec::new())
    }

    /// Validate any input value.
    ///
    /// A top-level string or list has no key, so its violation carries none.
    pub fn validate(&self, input: &Input) -> Result<(), Violation> {
        if !self.config.enabled {
            debug!("SQL injection scanning disabled, skipping input");
            return Ok(());
        }

        let mut path: Vec<Segment<'_>> = Vec::new();
        match input {
            Input::StringValue(s) => self.check_leaf(None, s, &path),
            Input::ListValue(items) => self.walk_list(None, items, &mut path),
            Input::MapValue(data) => self.walk_mapping(data, &mut path),
            Input::OtherValue => Ok(()),
        }
    }

    /// Validate a parsed JSON document, keeping its key order.
    pub fn validate_json(&self, value: &serde_json::Value) -> Result<(), Violation> {
        self.validate(&Input::from(value))
    }

    fn walk_mapping<'a>(
        &self,
        data: &'a Mapping,
        path: &mut Vec<Segment<'a>>,
    ) -> Result<(), Violation> {
        for (key, value) in data.iter() {
            path.push(Segment::Key(key));
            match value {
                Input::MapValue(nested) => self.walk_mapping(nested, path)?,
                Input::StringValue(s) => self.check_leaf(Some(key), s, path)?,
                Input::ListValue(items) => self.walk_list(Some(key), items, path)?,
                Input::OtherValue => {}
            }
            path.pop();
        }
        Ok(())
    }

    fn walk_list<'a>(
        &self,
        key: Option<&str>,
        items: &'a [Input],
        path: &mut Vec<Segment<'a>>,
    ) -> Result<(), Violation> {
        for (index, item) in items.iter().enumerate() {
            path.push(Segment::Index(index));
            match item {
                Input::StringValue(s) => self.check_leaf(key, s, path)?,
                Input::MapValue(nested) if self.config.deep_lists => {
                    self.walk_mapping(nested, path)?
                }
                Input::ListValue(inner) if self.config.deep_lists => {
                    self.walk_list(key, inner, path)?
                }
                _ => {}
            }
            path.pop();
        }
        Ok(())
    }

    fn check_leaf(
        &self,
        key: Option<&str>,
        value: &str,
        path: &[Segment<'_>],
    ) -> Result<(), Violation> {
        match self.rules.find_match(value) {
            Some(rule) => Err(self.report(key, value, rule, path)),
            None => Ok(()),
        }
    }

    fn report(
        &self,
        key: Option<&str>,
        value: &str,
        rule: &Rule,
        path: &[Segment<'_>],
    ) -> Violation {
        let mut violation = Violation::injection(key, value)
            .with_description(format!("matched rule '{}'", rule.name()));
        if !path.is_empty() {
            violation = violation.with_path(format_path(path));
        }

        let location = violation.path.as_deref().unwrap_or("<root>");
        if self.config.log_values {
            warn!(
                "SQL injection suspected at {} (rule '{}'): {}",
                location,
                rule.name(),
                truncate_for_log(value, MAX_LOGGED_VALUE_LEN)
            );
        } else {
            warn!(
                "SQL injection suspected at {} (rule '{}')",
                location,
                rule.name()
            );
        }

        violation
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(RuleSet::standard(), ScannerConfig::default())
    }
}

/// Render a path as `outer.inner[2]`.
fn format_path(path: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            Segment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            Segment::Index(index) => {
                let _ = write!(out, "[{}]", index);
            }
        }
    }
    out
}

/// Truncate a value for logging without splitting a character.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ENV_DEEP_LISTS;
    use serde_json::json;
    use serial_test::serial;

    fn validator() -> Validator {
        Validator::default()
    }

    fn deep_validator() -> Validator {
        Validator::new(
            RuleSet::standard(),
            ScannerConfig {
                deep_lists: true,
                ..ScannerConfig::default()
            },
        )
    }

    fn mapping(value: serde_json::Value) -> Mapping {
        match Input::from(value) {
            Input::MapValue(m) => m,
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_string() {
        let v = validator();
        assert!(v.validate_string("SELECT * FROM users"));
        assert!(!v.validate_string("hello from the other side"));
        assert!(!v.validate_string(""));
    }

    #[test]
    fn test_validate_list_is_shallow() {
        let v = validator();
        let items = vec![Input::from("safe"), Input::from("DROP TABLE accounts")];
        assert!(v.validate_list(&items));

        let nested = vec![
            Input::OtherValue,
            Input::ListValue(vec![Input::from("DROP TABLE accounts")]),
        ];
        assert!(!v.validate_list(&nested));
        assert!(!v.validate_list(&[]));
    }

    #[test]
    fn test_string_violation_fields() {
        let err = validator()
            .validate_mapping(&mapping(json!({"q": "dr/**/op table users"})))
            .unwrap_err();
        assert_eq!(err.key.as_deref(), Some("q"));
        assert_eq!(err.value.as_deref(), Some("dr/**/op table users"));
        assert_eq!(err.path.as_deref(), Some("q"));
        assert_eq!(err.description.as_deref(), Some("matched rule 'drop'"));
    }

    #[test]
    fn test_nested_violation_propagates() {
        let data = mapping(json!({
            "ok": "fine",
            "nested": {"deeper": {"x": "1=1; DELETE FROM sessions"}}
        }));
        let err = validator().validate_mapping(&data).unwrap_err();
        assert_eq!(err.key.as_deref(), Some("x"));
        assert_eq!(err.path.as_deref(), Some("nested.deeper.x"));
    }

    #[test]
    fn test_list_violation_carries_list_key() {
        let data = mapping(json!({"tags": ["a", 3, "insert into t values (1)"]}));
        let err = validator().validate_mapping(&data).unwrap_err();
        assert_eq!(err.key.as_deref(), Some("tags"));
        assert_eq!(err.value.as_deref(), Some("insert into t values (1)"));
        assert_eq!(err.path.as_deref(), Some("tags[2]"));
    }

    #[test]
    fn test_containers_in_lists_need_deep_lists() {
        let data = mapping(json!({"items": [{"name": "drop table users"}, ["select 1 from x"]]}));
        assert!(validator().validate_mapping(&data).is_ok());

        let err = deep_validator().validate_mapping(&data).unwrap_err();
        assert_eq!(err.key.as_deref(), Some("name"));
        assert_eq!(err.path.as_deref(), Some("items[0].name"));
    }

    #[test]
    fn test_deep_nested_list_keeps_outer_key() {
        let data = mapping(json!({"grid": [["ok"], ["select 1 from x"]]}));
        let err = deep_validator().validate_mapping(&data).unwrap_err();
        assert_eq!(err.key.as_deref(), Some("grid"));
        assert_eq!(err.path.as_deref(), Some("grid[1][0]"));
    }

    #[test]
    fn test_empty_and_inert_values_are_clean() {
        let data = mapping(json!({"empty": {}, "n": 1, "b": true, "z": null, "l": []}));
        assert!(validator().validate_mapping(&data).is_ok());
        assert!(validator().validate_mapping(&Mapping::new()).is_ok());
    }

    #[test]
    fn test_validate_top_level_shapes() {
        let v = validator();

        let err = v.validate(&Input::from("drop table x")).unwrap_err();
        assert!(err.key.is_none());
        assert!(err.path.is_none());

        let err = v
            .validate(&Input::ListValue(vec![Input::from("ok"), Input::from("begin x end")]))
            .unwrap_err();
        assert!(err.key.is_none());
        assert_eq!(err.path.as_deref(), Some("[1]"));

        assert!(v.validate(&Input::OtherValue).is_ok());
    }

    #[test]
    fn test_validate_json() {
        let v = validator();
        assert!(v.validate_json(&json!({"name": "Alice"})).is_ok());
        assert!(v.validate_json(&json!("truncate table logs")).is_err());
        assert!(v.validate_json(&json!(42)).is_ok());
    }

    #[test]
    fn test_disabled_validator() {
        let v = Validator::new(
            RuleSet::standard(),
            ScannerConfig {
                enabled: false,
                ..ScannerConfig::default()
            },
        );
        assert!(!v.validate_string("DROP TABLE users"));
        assert!(!v.validate_list(&[Input::from("DROP TABLE users")]));
        assert!(v
            .validate_mapping(&mapping(json!({"q": "DROP TABLE users"})))
            .is_ok());
        assert!(v.validate(&Input::from("DROP TABLE users")).is_ok());
        assert!(!v.config().enabled);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_config() {
        std::env::set_var(ENV_DEEP_LISTS, "true");
        let v = Validator::from_env();
        std::env::remove_var(ENV_DEEP_LISTS);

        assert!(v.config().deep_lists);
        assert!(v.config().enabled);
        assert_eq!(v.rules().len(), RuleSet::standard().len());
        let data = mapping(json!({"rows": [{"q": "select 1 from t"}]}));
        assert!(v.validate_mapping(&data).is_err());
    }

    #[test]
    fn test_custom_rules() {
        let rules = RuleSet::new(vec![Rule::new("union", &["union"], &["select"]).unwrap()]).unwrap();
        let v = Validator::new(Arc::new(rules), ScannerConfig::default());
        assert!(v.validate_string("1 UNION SELECT password"));
        assert!(!v.validate_string("SELECT * FROM users"));
        assert_eq!(v.rules().len(), 1);
    }

    #[test]
    fn test_format_path() {
        let path = [Segment::Key("a"), Segment::Index(0), Segment::Key("b")];
        assert_eq!(format_path(&path), "a[0].b");
        assert_eq!(format_path(&[Segment::Index(3)]), "[3]");
        assert_eq!(format_path(&[]), "");
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short", 10), "short");
        assert_eq!(truncate_for_log("abcdef", 3), "abc...");
        assert_eq!(truncate_for_log("héllo", 2), "h...");
    }
}
