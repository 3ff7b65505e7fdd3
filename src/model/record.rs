//! Records as delivered by the data layer
//!
//! A record is an opaque JSON object. The browser only reads it: the `id`,
//! foreign keys such as `post_id`, and embedded sub-objects such as `author`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One domain entity (a comment, a post, ...)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Build a record from a JSON value, which must be an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn id(&self) -> Option<&Value> {
        self.fields.get("id")
    }

    /// The id normalised to a lookup key
    pub fn id_key(&self) -> Option<String> {
        self.id().and_then(key_of)
    }

    /// Id rendered for messages, `?` when absent
    pub fn id_label(&self) -> String {
        self.id_key().unwrap_or_else(|| "?".to_string())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Look up a dotted path such as `author.name`
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self.fields.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Display text for a dotted path; empty when missing or null
    pub fn text(&self, path: &str) -> String {
        self.get_path(path).map(display_value).unwrap_or_default()
    }
}

/// Normalise a scalar JSON value to a lookup key
///
/// Numbers and strings share a key space so that `10` and `"10"` refer to the
/// same related record. Null, arrays and objects have no key.
pub fn key_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Render a JSON value as plain text
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Related records keyed by the foreign-key value that references them
///
/// Built fresh for a single export or page load and then dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelatedRecordMap {
    records: HashMap<String, Record>,
}

impl RelatedRecordMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the record referenced by a foreign-key value
    pub fn get(&self, foreign_key: &Value) -> Option<&Record> {
        key_of(foreign_key).and_then(|key| self.records.get(&key))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Record)> {
        self.records.iter()
    }
}

impl FromIterator<(String, Record)> for RelatedRecordMap {
    fn from_iter<I: IntoIterator<Item = (String, Record)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
