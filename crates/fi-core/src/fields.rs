use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// Flat string map of submitted form fields.
///
/// Repeated names keep the last value; there is no multi-value support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ordered `(name, value)` pairs; later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Parse a JSON object body. Strings are kept verbatim, `null` drops the
    /// field and any other value is stored as its JSON text.
    pub fn from_json_body(body: &str) -> serde_json::Result<Self> {
        let object: Map<String, Value> = serde_json::from_str(body)?;
        Ok(Self(
            object
                .into_iter()
                .filter_map(|(key, value)| match value {
                    Value::Null => None,
                    Value::String(text) => Some((key, text)),
                    other => Some((key, other.to_string())),
                })
                .collect(),
        ))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value of `key` if present and non-empty.
    pub fn present(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Copy without the listed keys.
    pub fn without(&self, keys: &[&str]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(key, _)| !keys.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Drop every field.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}
