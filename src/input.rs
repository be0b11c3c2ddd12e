//! Input shape scanned by the validator.
//!
//! JSON-like data is modelled as a tagged union. Mapping keys keep their
//! insertion order, which is also the order the validator visits them in.

use serde_json::Value;
use std::collections::HashMap;

/// A scannable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A string leaf, checked against the rules
    StringValue(String),
    /// An ordered list of values
    ListValue(Vec<Input>),
    /// A nested key/value mapping
    MapValue(Mapping),
    /// Numbers, booleans and null; never scanned
    OtherValue,
}

impl Input {
    /// The string content, if this is a string leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Input::StringValue(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Input {
    fn from(value: &str) -> Self {
        Input::StringValue(value.to_string())
    }
}

impl From<String> for Input {
    fn from(value: String) -> Self {
        Input::StringValue(value)
    }
}

impl From<Vec<Input>> for Input {
    fn from(items: Vec<Input>) -> Self {
        Input::ListValue(items)
    }
}

impl From<Mapping> for Input {
    fn from(mapping: Mapping) -> Self {
        Input::MapValue(mapping)
    }
}

impl From<&Value> for Input {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => Input::StringValue(s.clone()),
            Value::Array(items) => Input::ListValue(items.iter().map(Input::from).collect()),
            Value::Object(map) => Input::MapValue(Mapping::from(map)),
            Value::Null | Value::Bool(_) | Value::Number(_) => Input::OtherValue,
        }
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        Input::from(&value)
    }
}

/// Ordered mapping with unique keys.
///
/// Entries keep insertion order; `index` maps each key to its entry position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Input)>,
    index: HashMap<String, usize>,
}

impl Mapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing (in place) any value already under `key`.
    ///
    /// Returns the replaced value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Input>) -> Option<Input> {
        let key = key.into();
        let value = value.into();

        match self.index.get(&key).copied() {
            Some(position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.push_unique(key, value);
                None
            }
        }
    }

    /// Append an entry whose key is known not to be present.
    fn push_unique(&mut self, key: String, value: Input) {
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Input>) -> Self {
        self.insert(key, value);
        self
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Input> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Input)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Input>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl From<&serde_json::Map<String, Value>> for Mapping {
    fn from(map: &serde_json::Map<String, Value>) -> Self {
        // JSON object keys are already unique
        let mut mapping = Mapping {
            entries: Vec::with_capacity(map.len()),
            index: HashMap::with_capacity(map.len()),
        };
        for (key, value) in map {
            mapping.push_unique(key.clone(), Input::from(value));
        }
        mapping
    }
}
