use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value, json};

/// Database property value in one of the types the founder schema uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Title(String),
    RichText(String),
    Email(String),
    Date(DateTime<Utc>),
    Select(String),
}

impl PropertyValue {
    pub fn to_json(&self) -> Value {
        match self {
            Self::Title(text) => json!({ "title": [{ "text": { "content": text } }] }),
            Self::RichText(text) => json!({ "rich_text": [{ "text": { "content": text } }] }),
            Self::Email(email) => json!({ "email": email }),
            Self::Date(at) => {
                json!({ "date": { "start": at.to_rfc3339_opts(SecondsFormat::Millis, true) } })
            }
            Self::Select(name) => json!({ "select": { "name": name } }),
        }
    }
}

/// Property name -> value. Ordered so request bodies are deterministic.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

pub fn properties_to_json(properties: &PropertyMap) -> Value {
    let object: Map<String, Value> = properties
        .iter()
        .map(|(name, value)| (name.clone(), value.to_json()))
        .collect();
    Value::Object(object)
}
