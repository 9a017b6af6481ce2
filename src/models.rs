//! Data models for the Beszel client
//!
//! Records are kept as opaque JSON maps. The hub owns their schema, so
//! callers read known fields through [`RecordExt`] with explicit presence
//! checks instead of deserializing into fixed structs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A single collection record
pub type Record = Map<String, Value>;

/// One page of a collection listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResult {
    /// Records on this page
    #[serde(default)]
    pub items: Vec<Record>,
    /// Current page (1-based)
    #[serde(default)]
    pub page: u32,
    /// Page size the hub applied
    #[serde(default)]
    pub per_page: u32,
    /// Total matching records across all pages
    #[serde(default)]
    pub total_items: i64,
    /// Total pages
    #[serde(default)]
    pub total_pages: i64,
}

impl CollectionResult {
    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Response of the password and refresh auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Auth token, forwarded verbatim in the Authorization header
    pub token: String,
    /// The authenticated user record
    #[serde(default)]
    pub record: Record,
}

/// Aggregation window of a `system_stats` record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordType {
    #[default]
    OneMinute,
    TenMinutes,
    TwentyMinutes,
    TwoHours,
    EightHours,
}

impl RecordType {
    pub const ALL: [RecordType; 5] = [
        RecordType::OneMinute,
        RecordType::TenMinutes,
        RecordType::TwentyMinutes,
        RecordType::TwoHours,
        RecordType::EightHours,
    ];

    /// Wire value used in the `type` filter
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::OneMinute => "1m",
            RecordType::TenMinutes => "10m",
            RecordType::TwentyMinutes => "20m",
            RecordType::TwoHours => "120m",
            RecordType::EightHours => "480m",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::ALL
            .iter()
            .copied()
            .find(|rt| rt.as_str() == s)
            .ok_or_else(|| format!("unknown record type '{}' (expected one of 1m, 10m, 20m, 120m, 480m)", s))
    }
}

/// Typed, non-panicking field access on opaque records
pub trait RecordExt {
    /// String field, if present and a string
    fn str_field(&self, key: &str) -> Option<&str>;
    /// Numeric field as f64, if present and a number
    fn f64_field(&self, key: &str) -> Option<f64>;
    /// Integral field, if present and representable as i64
    fn i64_field(&self, key: &str) -> Option<i64>;
    /// Nested object, if present and an object
    fn object_field(&self, key: &str) -> Option<&Record>;
    /// Array field, if present and an array
    fn array_field(&self, key: &str) -> Option<&Vec<Value>>;
    /// Field rendered for display: strings unquoted, null/absent as empty
    fn display_field(&self, key: &str) -> String;
}

impl RecordExt for Record {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn f64_field(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    fn i64_field(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    fn object_field(&self, key: &str) -> Option<&Record> {
        self.get(key).and_then(Value::as_object)
    }

    fn array_field(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    fn display_field(&self, key: &str) -> String {
        match self.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}
