//! Loosely-typed raw records as produced by the per-platform collectors.
//!
//! Collectors disagree on column names and on value types (a CSV cell is
//! always text, a JSON export keeps numbers and booleans). [`RawRecord`]
//! stores whatever was read and coerces on access, so a lookup can never fail:
//! a value that cannot be read as the requested type is treated as absent.

use std::collections::BTreeMap;

/// A single field value from a collector export.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
    List(Vec<String>),
}

impl RawValue {
    /// Builds a value from one CSV cell. Empty cells are absent.
    #[must_use]
    pub fn from_cell(cell: &str) -> Option<Self> {
        if cell.trim().is_empty() {
            None
        } else {
            Some(RawValue::Text(cell.to_string()))
        }
    }

    /// Builds a value from a JSON scalar or array. `null` is absent; nested
    /// objects are kept as their JSON text.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::Null => None,
            Value::Bool(b) => Some(RawValue::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(RawValue::Integer(i))
                } else if n.is_u64() {
                    Some(RawValue::Text(n.to_string()))
                } else {
                    n.as_f64().map(RawValue::Number)
                }
            }
            Value::String(s) => Some(RawValue::Text(s.clone())),
            Value::Array(items) => Some(RawValue::List(
                items
                    .iter()
                    .filter_map(RawValue::from_json)
                    .filter_map(|v| v.as_text())
                    .collect(),
            )),
            Value::Object(_) => Some(RawValue::Text(value.to_string())),
        }
    }

    /// Numeric view. Non-finite values are treated as absent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
            RawValue::Integer(i) => *i as f64,
            RawValue::Number(n) => *n,
            RawValue::Bool(b) => f64::from(u8::from(*b)),
            RawValue::List(_) => return None,
        };
        n.is_finite().then_some(n)
    }

    /// Text view. Integral numbers render without a fractional part.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Text(s) => Some(s.clone()),
            RawValue::Integer(i) => Some(i.to_string()),
            RawValue::Number(n) if !n.is_finite() => None,
            RawValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{n:.0}"))
                } else {
                    Some(n.to_string())
                }
            }
            RawValue::Bool(b) => Some(b.to_string()),
            RawValue::List(items) => Some(items.join(",")),
        }
    }

    /// Boolean view. Unrecognized text is treated as absent.
    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            RawValue::Bool(b) => Some(*b),
            RawValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "y" => Some(true),
                "false" | "0" | "no" | "n" => Some(false),
                _ => None,
            },
            RawValue::Integer(i) => Some(*i != 0),
            RawValue::Number(n) if n.is_nan() => None,
            RawValue::Number(n) => Some(*n != 0.0),
            RawValue::List(_) => None,
        }
    }
}

/// One scraped entity: field name to value, no fixed schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: BTreeMap<String, RawValue>,
}

impl RawRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for fixtures.
    #[must_use]
    pub fn with(mut self, key: &str, value: RawValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: RawValue) {
        self.fields.insert(key.to_string(), value);
    }

    /// Builds a record from a CSV header and one row. Cells beyond the header
    /// are ignored; missing trailing cells are absent.
    #[must_use]
    pub fn from_row(header: &[String], row: &[String]) -> Self {
        let mut record = Self::new();
        for (key, cell) in header.iter().zip(row) {
            if let Some(value) = RawValue::from_cell(cell) {
                record.insert(key.trim(), value);
            }
        }
        record
    }

    /// Builds a record from a JSON object.
    #[must_use]
    pub fn from_json_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut record = Self::new();
        for (key, value) in object {
            if let Some(value) = RawValue::from_json(value) {
                record.insert(key, value);
            }
        }
        record
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(RawValue::as_number)
    }

    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(RawValue::as_text)
    }

    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(RawValue::as_flag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}
