use anyhow::{Result, anyhow};
use serde_json::Value;

/// A database page as returned by query/create/update.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    pub id: String,
    pub properties: Value,
}

impl PageRecord {
    pub fn from_json(value: &Value) -> Result<Self> {
        let id = value
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("page object has no id"))?
            .to_string();
        let properties = value.get("properties").cloned().unwrap_or(Value::Null);
        Ok(Self { id, properties })
    }

    /// Page ids referenced by a relation property, in stored order.
    ///
    /// A missing or non-relation property yields an empty list.
    pub fn relation_ids(&self, property: &str) -> Vec<String> {
        self.properties
            .get(property)
            .and_then(|prop| prop.get("relation"))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("id").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn email(&self, property: &str) -> Option<&str> {
        self.properties
            .get(property)
            .and_then(|prop| prop.get("email"))
            .and_then(Value::as_str)
    }
}
