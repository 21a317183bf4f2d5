//! Chart records: opaque key/value rows handed to the renderers

use crate::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single field value in a chart record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatumValue {
    Number(f64),
    Text(String),
    /// Anything else the backend sends along (booleans, nulls, nested objects)
    Other(serde_json::Value),
}

impl DatumValue {
    /// Numeric reading used for series values.
    ///
    /// Numeric text is parsed after trimming. Blank text, unparsable text and
    /// non-finite results (`"NaN"`, `"inf"`, `1e400`) all read as 0 so one bad
    /// row cannot poison the domain.
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(n) => finite_or_zero(*n),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(finite_or_zero)
                .unwrap_or(0.0),
            Self::Other(serde_json::Value::Bool(b)) => f64::from(u8::from(*b)),
            Self::Other(_) => 0.0,
        }
    }

    /// Display reading used for category labels and slice names
    pub fn as_label(&self) -> Option<String> {
        match self {
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::Other(serde_json::Value::Null) => None,
            Self::Other(v) => Some(v.to_string()),
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

impl From<f64> for DatumValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for DatumValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for DatumValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DatumValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One row of chart input, e.g. `{ "month": "Jan", "sales": 8200 }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartDatum(BTreeMap<String, DatumValue>);

impl ChartDatum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fluent field insertion
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DatumValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<DatumValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&DatumValue> {
        self.0.get(key)
    }

    /// Numeric field value, 0 when missing
    pub fn number(&self, key: &str) -> f64 {
        self.get(key).map(DatumValue::as_number).unwrap_or(0.0)
    }

    /// Label field value, `None` when missing or null
    pub fn label(&self, key: &str) -> Option<String> {
        self.get(key).and_then(DatumValue::as_label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<DatumValue>> FromIterator<(K, V)> for ChartDatum {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Read every numeric `key` in data order
pub fn values_of(data: &[ChartDatum], key: &str) -> Vec<f64> {
    data.iter().map(|d| d.number(key)).collect()
}

/// Parse a JSON array of records as fetched from the admin API.
///
/// Array elements that are not objects become empty records.
pub fn load_data(json: &str) -> Result<Vec<ChartDatum>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let rows = match value {
        serde_json::Value::Array(rows) => rows,
        other => return Err(ChartError::NotAnArray(json_type_name(&other))),
    };

    let data: Vec<ChartDatum> = rows
        .into_iter()
        .map(|row| match row {
            serde_json::Value::Object(_) => serde_json::from_value(row).unwrap_or_default(),
            _ => ChartDatum::default(),
        })
        .collect();

    tracing::debug!(rows = data.len(), "loaded chart data");
    Ok(data)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
