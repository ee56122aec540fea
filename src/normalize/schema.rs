//! Field schema: the immutable table of comparison fields the normalizer
//! extracts, with their keywords and fallbacks.
//!
//! The built-in table covers the common health-policy fields. A replacement
//! table can be loaded from YAML:
//!
//! ```yaml
//! fields:
//!   - name: sum_insured
//!     source: number
//!     key: sum_insured
//!   - name: maternity
//!     source: section
//!     keywords: ["maternity"]
//!     fallback:
//!       text: Not covered
//! ```

use crate::error::{PolicyDiffError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex"));

/// Ordered table of comparison fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub fields: Vec<FieldSpec>,
}

/// One output field of a comparison record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name in the produced record
    pub name: String,
    #[serde(flatten)]
    pub source: FieldSource,
}

/// Where a field's value comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum FieldSource {
    /// String metadata key on the policy object
    Text { key: String, default: String },
    /// Numeric metadata key; numeric strings are accepted
    Number {
        key: String,
        #[serde(default)]
        default: f64,
    },
    /// Length of a sequence key
    Count { key: String },
    /// Content of the first section whose title contains a keyword
    Section {
        keywords: Vec<String>,
        fallback: Fallback,
    },
}

/// Value used when no section matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Fixed string
    Text(String),
    /// String with `{field}` placeholders filled from earlier fields
    Template(String),
}

impl Fallback {
    /// Fill `{field}` placeholders using `lookup`. Unknown names are left as-is.
    pub fn render<F>(&self, lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        match self {
            Self::Text(text) => text.clone(),
            Self::Template(template) => PLACEHOLDER
                .replace_all(template, |caps: &regex::Captures<'_>| {
                    lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
                })
                .into_owned(),
        }
    }

    fn placeholders(&self) -> Vec<&str> {
        match self {
            Self::Text(_) => Vec::new(),
            Self::Template(template) => PLACEHOLDER
                .captures_iter(template)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
                .collect(),
        }
    }
}

impl FieldSpec {
    fn text(name: &str, key: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            source: FieldSource::Text {
                key: key.to_string(),
                default: default.to_string(),
            },
        }
    }

    fn number(name: &str, key: &str) -> Self {
        Self {
            name: name.to_string(),
            source: FieldSource::Number {
                key: key.to_string(),
                default: 0.0,
            },
        }
    }

    fn count(name: &str, key: &str) -> Self {
        Self {
            name: name.to_string(),
            source: FieldSource::Count {
                key: key.to_string(),
            },
        }
    }

    fn section(name: &str, keywords: &[&str], fallback: Fallback) -> Self {
        Self {
            name: name.to_string(),
            source: FieldSource::Section {
                keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
                fallback,
            },
        }
    }
}

const REFER: &str = "Refer to policy document";
const NOT_COVERED: &str = "Not covered";

impl Default for FieldSchema {
    fn default() -> Self {
        let text = |s: &str| Fallback::Text(s.to_string());
        Self {
            fields: vec![
                FieldSpec::text("policy_name", "policy_name", "Unnamed policy"),
                FieldSpec::text("insurer", "insurer", "Unknown insurer"),
                FieldSpec::text("policy_type", "policy_type", "Not specified"),
                FieldSpec::number("sum_insured", "sum_insured"),
                FieldSpec::number("premium_amount", "premium_amount"),
                FieldSpec::count("network_hospitals", "network_hospitals"),
                FieldSpec::section("initial_waiting", &["initial waiting"], text(REFER)),
                FieldSpec::section(
                    "pre_existing_waiting",
                    &["pre-existing", "pre existing"],
                    text(REFER),
                ),
                FieldSpec::section(
                    "specific_disease_waiting",
                    &["specific disease", "specified disease"],
                    text(REFER),
                ),
                FieldSpec::section("maternity", &["maternity"], text(NOT_COVERED)),
                FieldSpec::section("room_rent", &["room rent"], text("No sub-limit specified")),
                FieldSpec::section(
                    "hospitalization_limit",
                    &["hospitalization", "hospitalisation"],
                    Fallback::Template("Up to sum insured ({sum_insured})".to_string()),
                ),
                FieldSpec::section(
                    "co_payment",
                    &["co-payment", "copayment", "co-pay"],
                    text("No co-payment"),
                ),
                FieldSpec::section("day_care", &["day care", "daycare"], text(NOT_COVERED)),
                FieldSpec::section("ambulance", &["ambulance"], text(NOT_COVERED)),
                FieldSpec::section("exclusions", &["exclusion"], text(REFER)),
                FieldSpec::section("claim_process", &["claim"], text(REFER)),
            ],
        }
    }
}

impl FieldSchema {
    /// Parse a schema from YAML and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let schema: Self = serde_yaml::from_str(yaml)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load a schema file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PolicyDiffError::io(path, e))?;
        Self::from_yaml(&content)
    }

    /// Field names in output order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Check structural consistency of the table.
    ///
    /// Names must be unique, section fields need at least one non-blank
    /// keyword, and template placeholders may only name earlier fields.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.fields.len());
        for spec in &self.fields {
            if spec.name.trim().is_empty() {
                return Err(PolicyDiffError::config("field schema: empty field name"));
            }
            if let FieldSource::Section { keywords, fallback } = &spec.source {
                if keywords.is_empty() || keywords.iter().any(|k| k.trim().is_empty()) {
                    return Err(PolicyDiffError::config(format!(
                        "field schema: '{}' needs non-blank keywords",
                        spec.name
                    )));
                }
                for name in fallback.placeholders() {
                    if !seen.contains(name) {
                        return Err(PolicyDiffError::config(format!(
                            "field schema: template for '{}' references '{name}', which is not an earlier field",
                            spec.name
                        )));
                    }
                }
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(PolicyDiffError::config(format!(
                    "field schema: duplicate field '{}'",
                    spec.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_is_valid() {
        let schema = FieldSchema::default();
        schema.validate().unwrap();
        assert_eq!(schema.fields.len(), 17);
        assert_eq!(schema.field_names().next(), Some("policy_name"));
    }

    #[test]
    fn test_template_render() {
        let fallback = Fallback::Template("Up to sum insured ({sum_insured}) {missing}".into());
        let rendered = fallback.render(|name| (name == "sum_insured").then(|| "500000".to_string()));
        assert_eq!(rendered, "Up to sum insured (500000) {missing}");
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
fields:
  - name: sum_insured
    source: number
    key: sum_insured
  - name: network
    source: count
    key: network_hospitals
  - name: maternity
    source: section
    keywords: ["maternity", "pregnancy"]
    fallback:
      text: Not covered
  - name: limit
    source: section
    keywords: ["hospitalization"]
    fallback:
      template: "Up to {sum_insured}"
"#;
        let schema = FieldSchema::from_yaml(yaml).unwrap();
        assert_eq!(schema.fields.len(), 4);
        assert_eq!(
            schema.fields[0].source,
            FieldSource::Number {
                key: "sum_insured".into(),
                default: 0.0
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let yaml = r#"
fields:
  - {name: a, source: count, key: x}
  - {name: a, source: count, key: y}
"#;
        assert!(matches!(
            FieldSchema::from_yaml(yaml),
            Err(PolicyDiffError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_forward_template_reference() {
        let schema = FieldSchema {
            fields: vec![
                FieldSpec::section("limit", &["hosp"], Fallback::Template("{sum}".into())),
                FieldSpec::number("sum", "sum_insured"),
            ],
        };
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_keyword() {
        let schema = FieldSchema {
            fields: vec![FieldSpec::section("x", &["  "], Fallback::Text("n/a".into()))],
        };
        assert!(schema.validate().is_err());
    }
}
