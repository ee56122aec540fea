//! Flat comparison record produced by the field normalizer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single extracted comparison value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Count of a sequence, e.g. network hospitals
    Count(u64),
    /// Numeric metadata such as sum insured
    Number(f64),
    /// Section content or a documented fallback string
    Text(String),
}

impl FieldValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            #[allow(clippy::cast_precision_loss)]
            Self::Count(c) => Some(*c as f64),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Count(c) => write!(f, "{c}"),
            Self::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{n:.0}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Canonical comparison fields for one document, in schema order.
///
/// A record is always fully populated: every schema field is present,
/// either extracted or defaulted. Documents that cannot be normalized get
/// no record at all (`None`), never a partial one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonRecord {
    fields: IndexMap<String, FieldValue>,
}

impl ComparisonRecord {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Text value of a field, `None` if absent or not text.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    /// Numeric value of a field (numbers and counts).
    #[must_use]
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display_drops_integral_fraction() {
        assert_eq!(FieldValue::Number(500_000.0).to_string(), "500000");
        assert_eq!(FieldValue::Number(12.5).to_string(), "12.5");
        assert_eq!(FieldValue::Count(7).to_string(), "7");
    }

    #[test]
    fn test_record_serializes_as_flat_map() {
        let mut record = ComparisonRecord::with_capacity(2);
        record.insert("maternity", FieldValue::from("Not covered"));
        record.insert("network_hospitals", FieldValue::Count(3));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"maternity":"Not covered","network_hospitals":3}"#);
    }

    #[test]
    fn test_accessors() {
        let mut record = ComparisonRecord::default();
        record.insert("sum_insured", FieldValue::Number(0.0));
        record.insert("maternity", FieldValue::from("Not covered"));
        assert_eq!(record.number("sum_insured"), Some(0.0));
        assert_eq!(record.text("maternity"), Some("Not covered"));
        assert_eq!(record.text("sum_insured"), None);
        assert_eq!(record.field_names().collect::<Vec<_>>(), vec!["sum_insured", "maternity"]);
    }
}
