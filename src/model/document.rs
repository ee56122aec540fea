//! Typed policy document tree.
//!
//! The field normalizer reads raw `serde_json::Value` and tolerates arbitrary
//! shapes. This typed tree is for trusted input, such as extracting clauses
//! from a versioned document.

use super::{Clause, ClauseId};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Root of a policy document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_insured: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub network_hospitals: Vec<HospitalRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub sections: Vec<Section>,
}

/// A titled content block. Only one level of `sub_sections` is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    /// Present when the section is also a numbered clause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clause_id: Option<ClauseId>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub sub_sections: Vec<Section>,
}

/// A network hospital entry. Only the count is used for comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HospitalRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Anything else the source carried, kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Document {
    /// Deserialize from a JSON value, unwrapping an optional `policy` key.
    ///
    /// A `null` wrapper is treated as absent; any other non-object wrapper
    /// is rejected.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Object(mut root) => match root.remove("policy") {
                None | Some(Value::Null) => serde_json::from_value(Value::Object(root)),
                Some(inner @ Value::Object(_)) => serde_json::from_value(inner),
                Some(other) => Err(de::Error::custom(format!(
                    "`policy` must be an object, found {}",
                    json_kind(&other)
                ))),
            },
            other => serde_json::from_value(other),
        }
    }

    /// Sections followed by their direct sub-sections, in document order.
    ///
    /// Sub-sections of sub-sections are not visited.
    pub fn sections_in_order(&self) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .flat_map(|section| std::iter::once(section).chain(section.sub_sections.iter()))
    }

    /// Clauses carried by numbered sections, in document order.
    #[must_use]
    pub fn clauses(&self) -> Vec<Clause> {
        self.sections_in_order()
            .filter_map(|section| {
                section.clause_id.as_ref().map(|id| Clause {
                    clause_id: id.clone(),
                    title: section.title.clone(),
                    text: section.content.clone(),
                })
            })
            .collect()
    }
}

/// Deserialize a field whose explicit `null` means the default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Article-qualified name of a JSON value's type, for error messages.
pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "policy": {
                "policy_name": "Health Shield",
                "sum_insured": 500000,
                "network_hospitals": [{"name": "City Care", "city": "Pune", "beds": 40}],
                "sections": [
                    {
                        "clause_id": "4",
                        "title": "Waiting Periods",
                        "content": "See below",
                        "sub_sections": [
                            {"clause_id": "4.1", "title": "Initial Waiting Period", "content": "30 days",
                             "sub_sections": [{"clause_id": "4.1.1", "title": "Deep", "content": "ignored"}]},
                            {"title": "Note", "content": "unnumbered"}
                        ]
                    },
                    {"clause_id": "6.1", "title": "Maternity", "content": "After 24 months"}
                ]
            }
        })
    }

    #[test]
    fn test_from_value_unwraps_policy() {
        let doc = Document::from_value(sample()).unwrap();
        assert_eq!(doc.policy_name.as_deref(), Some("Health Shield"));
        assert_eq!(doc.sum_insured, Some(500_000.0));
        assert_eq!(doc.network_hospitals.len(), 1);
        assert_eq!(doc.network_hospitals[0].extra.get("beds"), Some(&json!(40)));
    }

    #[test]
    fn test_from_value_root_level_fields() {
        let doc = Document::from_value(json!({"insurer": "Acme", "sections": []})).unwrap();
        assert_eq!(doc.insurer.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_clauses_stop_at_depth_two() {
        let doc = Document::from_value(sample()).unwrap();
        let ids: Vec<_> = doc
            .clauses()
            .into_iter()
            .map(|c| c.clause_id.to_string())
            .collect();
        assert_eq!(ids, vec!["4", "4.1", "6.1"]);
    }

    #[test]
    fn test_from_value_rejects_scalar_policy() {
        let err = Document::from_value(json!({"policy": "oops", "sections": []})).unwrap_err();
        assert!(err.to_string().contains("`policy` must be an object, found a string"));

        let doc = Document::from_value(json!({"policy": null, "insurer": "Acme"})).unwrap();
        assert_eq!(doc.insurer.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let doc = Document::from_value(json!({
            "network_hospitals": null,
            "sections": [{"clause_id": "1", "title": null, "content": null, "sub_sections": null}]
        }))
        .unwrap();
        assert!(doc.network_hospitals.is_empty());
        assert_eq!(doc.sections[0].title, "");
        assert_eq!(doc.sections[0].content, "");
        assert!(doc.sections[0].sub_sections.is_empty());
    }
}
