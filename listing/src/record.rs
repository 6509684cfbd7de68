//! Typed list records.
//!
//! Each module's listing has its own record type. Fields the backend may omit
//! are `Option`s, and [`Record::field`] reports them as absent so a filter on
//! them simply does not match. [`JsonRecord`] covers payloads with no typed
//! counterpart.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use tracing::warn;

use crate::error::{ListingError, Result};

/// A listed business entity as seen by the query engine.
pub trait Record {
    /// Fields searched by default for this record type.
    const SEARCH_FIELDS: &'static [&'static str];

    /// Stable identifier used as the row key.
    fn key(&self) -> &str;

    /// Text value of a named field, or `None` when the record lacks it.
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Accept `"42"` or `42` for identifiers.
fn key_from_scalar<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

fn borrowed(value: &str) -> Option<Cow<'_, str>> {
    Some(Cow::Borrowed(value))
}

fn optional(value: &Option<String>) -> Option<Cow<'_, str>> {
    value.as_deref().map(Cow::Borrowed)
}

/// Issue tracker entry (quality / project modules).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(deserialize_with = "key_from_scalar")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    #[serde(default)]
    pub priority: Option<String>,
    /// Assignee display name
    #[serde(default)]
    pub assignee: Option<String>,
    /// Project display name
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub reported_on: Option<NaiveDate>,
}

impl Record for Issue {
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "assignee", "project"];

    fn key(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => borrowed(&self.id),
            "title" => borrowed(&self.title),
            "description" => optional(&self.description),
            "status" => borrowed(&self.status),
            "priority" => optional(&self.priority),
            "assignee" => optional(&self.assignee),
            "project" => optional(&self.project),
            "reported_on" => self.reported_on.map(|d| Cow::Owned(d.to_string())),
            _ => None,
        }
    }
}

/// Project task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "key_from_scalar")]
    pub id: String,
    pub title: String,
    pub status: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Completion percentage, 0 to 100
    #[serde(default)]
    pub progress: Option<u8>,
}

impl Task {
    /// Whether the task is past due on `today` and not yet done.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != "completed" && self.due_date.is_some_and(|due| due < today)
    }
}

impl Record for Task {
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "assignee", "project"];

    fn key(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => borrowed(&self.id),
            "title" => borrowed(&self.title),
            "status" => borrowed(&self.status),
            "priority" => optional(&self.priority),
            "assignee" => optional(&self.assignee),
            "project" => optional(&self.project),
            "due_date" => self.due_date.map(|d| Cow::Owned(d.to_string())),
            "progress" => self.progress.map(|p| Cow::Owned(p.to_string())),
            _ => None,
        }
    }
}

/// Project portfolio entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "key_from_scalar")]
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Record for Project {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "manager", "client"];

    fn key(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => borrowed(&self.id),
            "name" => borrowed(&self.name),
            "status" => borrowed(&self.status),
            "manager" => optional(&self.manager),
            "client" => optional(&self.client),
            "start_date" => self.start_date.map(|d| Cow::Owned(d.to_string())),
            "end_date" => self.end_date.map(|d| Cow::Owned(d.to_string())),
            _ => None,
        }
    }
}

/// Tenant (customer organisation) in the admin console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    #[serde(deserialize_with = "key_from_scalar")]
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub admin_email: Option<String>,
}

impl Record for Tenant {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "domain", "admin_email"];

    fn key(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => borrowed(&self.id),
            "name" => borrowed(&self.name),
            "status" => borrowed(&self.status),
            "domain" => optional(&self.domain),
            "plan" => optional(&self.plan),
            "admin_email" => optional(&self.admin_email),
            _ => None,
        }
    }
}

/// HR holiday calendar entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    #[serde(deserialize_with = "key_from_scalar")]
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    /// e.g. "public", "optional", "restricted"
    #[serde(default)]
    pub holiday_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Record for Holiday {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "location"];

    fn key(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => borrowed(&self.id),
            "name" => borrowed(&self.name),
            "date" => Some(Cow::Owned(self.date.to_string())),
            "year" => Some(Cow::Owned(self.date.year().to_string())),
            "month" => Some(Cow::Owned(self.date.month().to_string())),
            "holiday_type" => optional(&self.holiday_type),
            "location" => optional(&self.location),
            _ => None,
        }
    }
}

/// An untyped record: any JSON object with a key field.
///
/// Dotted names (`assignee.name`) reach into nested objects. Strings, numbers
/// and booleans read as text; null, arrays and objects read as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRecord {
    key: String,
    value: serde_json::Value,
}

impl JsonRecord {
    /// Wrap `value`, taking its key from `key_field`.
    pub fn new(value: serde_json::Value, key_field: &str) -> Result<Self> {
        let key = match value.get(key_field) {
            Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => return Err(ListingError::MissingKey(key_field.to_string())),
        };
        Ok(Self { key, value })
    }

    /// The wrapped JSON.
    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    fn lookup(&self, path: &str) -> Option<&serde_json::Value> {
        path.split('.')
            .try_fold(&self.value, |node, segment| node.get(segment))
    }
}

impl Record for JsonRecord {
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "name"];

    fn key(&self) -> &str {
        &self.key
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.lookup(name)? {
            serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            serde_json::Value::Number(n) => Some(Cow::Owned(n.to_string())),
            serde_json::Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }
}

/// Records decoded from a list payload.
#[derive(Debug, Clone)]
pub struct Decoded<R> {
    /// Records that decoded
    pub records: Vec<R>,
    /// Entries that did not match the record shape
    pub skipped: usize,
}

/// Decode a list payload leniently.
///
/// Accepts a bare array, an object with a `data` array, or `null` (empty).
/// Individual entries that fail to decode are skipped and counted rather than
/// failing the whole list.
pub fn decode_records<R>(payload: serde_json::Value) -> Result<Decoded<R>>
where
    R: serde::de::DeserializeOwned,
{
    let items = match payload {
        serde_json::Value::Null => Vec::new(),
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("data") {
            Some(serde_json::Value::Array(items)) => items,
            Some(serde_json::Value::Null) => Vec::new(),
            _ => return Err(ListingError::NotAList("object without a data array")),
        },
        serde_json::Value::Bool(_) => return Err(ListingError::NotAList("boolean")),
        serde_json::Value::Number(_) => return Err(ListingError::NotAList("number")),
        serde_json::Value::String(_) => return Err(ListingError::NotAList("string")),
    };

    let mut records = Vec::with_capacity(items.len());
    let mut skipped = 0;
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<R>(item) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed record");
                skipped += 1;
            }
        }
    }

    Ok(Decoded { records, skipped })
}
