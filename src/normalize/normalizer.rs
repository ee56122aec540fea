//! Keyword-driven extraction of a flat comparison record from a policy
//! document.

use super::schema::{FieldSchema, FieldSource};
use crate::model::{json_kind, ComparisonRecord, FieldValue};
use serde_json::{Map, Value};
use std::sync::LazyLock;
use thiserror::Error;

/// Why a document could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedDocument {
    #[error("document root is {found}, expected an object")]
    NotAnObject { found: &'static str },

    #[error("'policy' wrapper is {found}, expected an object")]
    InvalidWrapper { found: &'static str },

    #[error("{path} is {found}, expected {expected}")]
    UnexpectedType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// A section or direct sub-section, flattened for matching.
struct SectionView<'a> {
    title: Option<String>,
    content: &'a str,
}

#[derive(Debug, Clone)]
struct CompiledField {
    name: String,
    source: FieldSource,
    /// Lowercased keywords; empty for metadata fields
    keywords: Vec<String>,
}

/// Extracts comparison records according to a [`FieldSchema`].
///
/// Stateless after construction and safe to share across threads.
#[derive(Debug, Clone)]
pub struct FieldNormalizer {
    schema: FieldSchema,
    fields: Vec<CompiledField>,
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new(FieldSchema::default())
    }
}

impl FieldNormalizer {
    #[must_use]
    pub fn new(schema: FieldSchema) -> Self {
        let fields = schema
            .fields
            .iter()
            .map(|spec| CompiledField {
                name: spec.name.clone(),
                source: spec.source.clone(),
                keywords: match &spec.source {
                    FieldSource::Section { keywords, .. } => {
                        keywords.iter().map(|k| k.to_lowercase()).collect()
                    }
                    _ => Vec::new(),
                },
            })
            .collect();
        Self { schema, fields }
    }

    #[must_use]
    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Normalize a document, or `None` when it is not comparison-ready.
    #[must_use]
    pub fn normalize(&self, document: &Value) -> Option<ComparisonRecord> {
        match self.try_normalize(document) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::debug!(error = %err, "document is not comparison-ready");
                None
            }
        }
    }

    /// Normalize a document, reporting why it is malformed.
    ///
    /// The whole document is checked before any field is extracted, so the
    /// result is either a complete record or an error.
    pub fn try_normalize(&self, document: &Value) -> Result<ComparisonRecord, MalformedDocument> {
        let policy = unwrap_policy(document)?;
        let sections = collect_sections(policy)?;

        let mut record = ComparisonRecord::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = match &field.source {
                FieldSource::Text { key, default } => FieldValue::Text(
                    text_field(policy, key)?
                        .unwrap_or(default.as_str())
                        .to_string(),
                ),
                FieldSource::Number { key, default } => {
                    FieldValue::Number(number_field(policy, key)?.unwrap_or(*default))
                }
                FieldSource::Count { key } => FieldValue::Count(count_field(policy, key)?),
                FieldSource::Section { fallback, .. } => {
                    match first_match(&sections, &field.keywords) {
                        Some(section) => {
                            tracing::debug!(field = %field.name, "matched section");
                            FieldValue::Text(section.content.to_string())
                        }
                        None => FieldValue::Text(
                            fallback.render(|name| record.get(name).map(ToString::to_string)),
                        ),
                    }
                }
            };
            record.insert(field.name.clone(), value);
        }
        Ok(record)
    }
}

static DEFAULT_NORMALIZER: LazyLock<FieldNormalizer> = LazyLock::new(FieldNormalizer::default);

/// Normalize with the built-in field table.
#[must_use]
pub fn normalize_fields(document: &Value) -> Option<ComparisonRecord> {
    DEFAULT_NORMALIZER.normalize(document)
}

fn unwrap_policy(document: &Value) -> Result<&Map<String, Value>, MalformedDocument> {
    let root = document.as_object().ok_or(MalformedDocument::NotAnObject {
        found: json_kind(document),
    })?;
    match root.get("policy") {
        None | Some(Value::Null) => Ok(root),
        Some(Value::Object(inner)) => Ok(inner),
        Some(other) => Err(MalformedDocument::InvalidWrapper {
            found: json_kind(other),
        }),
    }
}

fn collect_sections(
    policy: &Map<String, Value>,
) -> Result<Vec<SectionView<'_>>, MalformedDocument> {
    let mut views = Vec::new();
    let Some(sections) = optional_array(policy, "sections", "sections")? else {
        return Ok(views);
    };
    for (i, entry) in sections.iter().enumerate() {
        let path = format!("sections[{i}]");
        let section = as_section(entry, &path)?;
        views.push(section_view(section, &path)?);

        let sub_path = format!("{path}.sub_sections");
        if let Some(subs) = optional_array(section, "sub_sections", &sub_path)? {
            for (j, sub) in subs.iter().enumerate() {
                let path = format!("{sub_path}[{j}]");
                let sub = as_section(sub, &path)?;
                views.push(section_view(sub, &path)?);
            }
        }
    }
    Ok(views)
}

fn as_section<'a>(
    entry: &'a Value,
    path: &str,
) -> Result<&'a Map<String, Value>, MalformedDocument> {
    entry
        .as_object()
        .ok_or_else(|| unexpected(path.to_string(), "an object", entry))
}

fn section_view<'a>(
    section: &'a Map<String, Value>,
    path: &str,
) -> Result<SectionView<'a>, MalformedDocument> {
    let title = optional_str(section, "title", &format!("{path}.title"))?;
    let content = optional_str(section, "content", &format!("{path}.content"))?;
    Ok(SectionView {
        title: title.map(str::to_lowercase),
        content: content.unwrap_or_default(),
    })
}

fn first_match<'s, 'a>(
    sections: &'s [SectionView<'a>],
    keywords: &[String],
) -> Option<&'s SectionView<'a>> {
    sections.iter().find(|section| {
        section
            .title
            .as_deref()
            .is_some_and(|title| keywords.iter().any(|kw| title.contains(kw.as_str())))
    })
}

fn text_field<'a>(
    policy: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a str>, MalformedDocument> {
    optional_str(policy, key, key)
}

fn number_field(policy: &Map<String, Value>, key: &str) -> Result<Option<f64>, MalformedDocument> {
    match policy.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(value @ Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| unexpected(key.to_string(), "a number", value)),
        Some(other) => Err(unexpected(key.to_string(), "a number", other)),
    }
}

fn count_field(policy: &Map<String, Value>, key: &str) -> Result<u64, MalformedDocument> {
    Ok(optional_array(policy, key, key)?.map_or(0, |items| items.len() as u64))
}

fn optional_str<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<&'a str>, MalformedDocument> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(unexpected(path.to_string(), "a string", other)),
    }
}

fn optional_array<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<&'a Vec<Value>>, MalformedDocument> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(unexpected(path.to_string(), "an array", other)),
    }
}

fn unexpected(path: String, expected: &'static str, found: &Value) -> MalformedDocument {
    MalformedDocument::UnexpectedType {
        path,
        expected,
        found: json_kind(found),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{Fallback, FieldSpec};
    use serde_json::json;

    fn sample_policy() -> Value {
        json!({
            "policy": {
                "policy_name": "Health Shield Gold",
                "insurer": "Acme General",
                "sum_insured": 500000,
                "premium_amount": "12500.50",
                "policy_type": "Individual",
                "network_hospitals": [{"name": "A"}, {"name": "B"}, {"name": "C"}],
                "sections": [
                    {
                        "title": "Waiting Periods",
                        "content": "See below",
                        "sub_sections": [
                            {"title": "Initial Waiting Period", "content": "30 days"},
                            {"title": "Pre-Existing Diseases", "content": "36 months"}
                        ]
                    },
                    {"title": "Room Rent Limits", "content": "1% of sum insured per day"},
                    {"title": "MATERNITY BENEFIT", "content": "Covered after 24 months"},
                    {"title": "Maternity add-on", "content": "ignored, later match"}
                ]
            }
        })
    }

    #[test]
    fn test_empty_document_gets_defaults() {
        let record = normalize_fields(&json!({})).unwrap();
        assert_eq!(record.number("sum_insured"), Some(0.0));
        assert_eq!(record.get("network_hospitals"), Some(&FieldValue::Count(0)));
        assert_eq!(record.text("initial_waiting"), Some("Refer to policy document"));
        assert_eq!(record.text("maternity"), Some("Not covered"));
        assert_eq!(record.text("hospitalization_limit"), Some("Up to sum insured (0)"));
        assert_eq!(record.len(), FieldSchema::default().fields.len());
    }

    #[test]
    fn test_extracts_from_sections_and_sub_sections() {
        let record = normalize_fields(&sample_policy()).unwrap();
        assert_eq!(record.text("policy_name"), Some("Health Shield Gold"));
        assert_eq!(record.number("sum_insured"), Some(500_000.0));
        assert_eq!(record.number("premium_amount"), Some(12_500.5));
        assert_eq!(record.get("network_hospitals"), Some(&FieldValue::Count(3)));
        assert_eq!(record.text("initial_waiting"), Some("30 days"));
        assert_eq!(record.text("pre_existing_waiting"), Some("36 months"));
        assert_eq!(record.text("room_rent"), Some("1% of sum insured per day"));
        // case-insensitive, first match wins
        assert_eq!(record.text("maternity"), Some("Covered after 24 months"));
        assert_eq!(
            record.text("hospitalization_limit"),
            Some("Up to sum insured (500000)")
        );
    }

    #[test]
    fn test_fields_at_root_without_wrapper() {
        let record = normalize_fields(&json!({"insurer": "Root Insurer", "sections": null})).unwrap();
        assert_eq!(record.text("insurer"), Some("Root Insurer"));
    }

    #[test]
    fn test_non_object_inputs_are_null_sentinel() {
        assert!(normalize_fields(&Value::Null).is_none());
        assert!(normalize_fields(&json!([1, 2, 3])).is_none());
        assert!(normalize_fields(&json!("policy")).is_none());
        assert!(normalize_fields(&json!({"policy": "nope"})).is_none());
    }

    #[test]
    fn test_structural_errors_report_path() {
        let normalizer = FieldNormalizer::default();
        let doc = json!({"sections": [{"title": "Ok", "sub_sections": [{"title": 7}]}]});
        let err = normalizer.try_normalize(&doc).unwrap_err();
        assert_eq!(
            err,
            MalformedDocument::UnexpectedType {
                path: "sections[0].sub_sections[0].title".into(),
                expected: "a string",
                found: "a number",
            }
        );

        let doc = json!({"sections": {"title": "not a list"}});
        assert!(normalizer.try_normalize(&doc).is_err());
        let doc = json!({"sum_insured": "five lakh"});
        assert!(normalizer.try_normalize(&doc).is_err());
        let doc = json!({"network_hospitals": 12});
        assert!(normalizer.try_normalize(&doc).is_err());
    }

    #[test]
    fn test_untitled_section_never_matches_and_missing_content_is_empty() {
        let doc = json!({"sections": [
            {"content": "orphan maternity text"},
            {"title": "Ambulance"}
        ]});
        let record = normalize_fields(&doc).unwrap();
        assert_eq!(record.text("maternity"), Some("Not covered"));
        assert_eq!(record.text("ambulance"), Some(""));
    }

    #[test]
    fn test_deeper_nesting_is_not_traversed() {
        let doc = json!({"sections": [{"title": "Benefits", "sub_sections": [
            {"title": "Other", "sub_sections": [{"title": "Day Care", "content": "deep"}]}
        ]}]});
        let record = normalize_fields(&doc).unwrap();
        assert_eq!(record.text("day_care"), Some("Not covered"));
    }

    #[test]
    fn test_custom_schema() {
        let schema = FieldSchema {
            fields: vec![FieldSpec {
                name: "mental_health".into(),
                source: FieldSource::Section {
                    keywords: vec!["Mental Health".into()],
                    fallback: Fallback::Text("Excluded".into()),
                },
            }],
        };
        let normalizer = FieldNormalizer::new(schema);
        let doc = json!({"sections": [{"title": "mental health cover", "content": "Included"}]});
        let record = normalizer.normalize(&doc).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.text("mental_health"), Some("Included"));
    }
}
