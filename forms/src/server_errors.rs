//! Field errors reported by the backend.
//!
//! Update endpoints answer a rejected submission with a body such as
//! `{"errors": {"email": "Already registered", "phone": ["Invalid", "Too short"]}}`.
//! Only the first message per field is kept.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Field name to server message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerErrors(BTreeMap<String, String>);

impl ServerErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the `errors` mapping out of a response body.
    ///
    /// Returns `None` when the body carries no usable field errors.
    pub fn from_body(body: &Value) -> Option<Self> {
        let errors = body.get("errors")?.as_object()?;
        let parsed: BTreeMap<String, String> = errors
            .iter()
            .filter_map(|(field, value)| first_message(value).map(|m| (field.clone(), m)))
            .collect();
        (!parsed.is_empty()).then_some(Self(parsed))
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for ServerErrors {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_message),
        _ => None,
    }
}
