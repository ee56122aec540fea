//! Loading policy documents and clause snapshots from disk.
//!
//! Files are JSON or YAML, chosen by extension; unknown extensions are tried
//! as JSON first and then as YAML.

use crate::error::{ErrorContext, PolicyDiffError, Result};
use crate::model::{json_kind, Clause, ClauseId, ClauseIndex, Document, Section};
use serde_json::{Map, Value};
use std::path::Path;

/// Serialization a file is read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceFormat {
    Json,
    Yaml,
    Unknown,
}

impl SourceFormat {
    fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Unknown,
        }
    }
}

/// Parse file content into a JSON value.
fn parse_value(content: &str, format: SourceFormat) -> Result<Value> {
    match format {
        SourceFormat::Json => Ok(serde_json::from_str(content)?),
        SourceFormat::Yaml => Ok(serde_yaml::from_str(content)?),
        SourceFormat::Unknown => serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(PolicyDiffError::from),
    }
}

/// Read a JSON or YAML file into an untyped value.
pub fn load_document_value(path: &Path) -> Result<Value> {
    let content =
        std::fs::read_to_string(path).map_err(|e| PolicyDiffError::io(path, e))?;
    parse_value(&content, SourceFormat::from_path(path))
        .with_context(|| format!("reading {}", path.display()))
}

const SNAPSHOT: &str = "clause snapshot";

/// Extract a clause list from a snapshot value.
///
/// Accepted shapes: a clause array, an object with a `clauses` array, or a
/// policy document (optionally under `policy`) whose sections carry
/// `clause_id`s. Field types are checked before deserializing so that a
/// mistyped entry is reported by its path.
pub fn clauses_from_value(value: Value) -> Result<Vec<Clause>> {
    match value {
        Value::Array(entries) => clause_entries(entries),
        Value::Object(mut map) => {
            if let Some(clauses) = map.remove("clauses") {
                return match clauses {
                    Value::Array(entries) => clause_entries(entries),
                    _ => Err(PolicyDiffError::unrecognized_shape(
                        SNAPSHOT,
                        "`clauses` must be an array",
                    )),
                };
            }
            if !map.contains_key("sections") && !map.contains_key("policy") {
                return Err(PolicyDiffError::unrecognized_shape(
                    SNAPSHOT,
                    "expected a clause array, a `clauses` array or a policy document",
                ));
            }
            let mut root = match map.remove("policy") {
                None | Some(Value::Null) => map,
                Some(Value::Object(inner)) => inner,
                Some(other) => {
                    return Err(PolicyDiffError::unrecognized_shape(
                        SNAPSHOT,
                        format!("`policy` must be an object, found {}", json_kind(&other)),
                    ))
                }
            };
            // metadata fields are the normalizer's concern; only sections carry clauses
            let sections = root.remove("sections").unwrap_or(Value::Null);
            check_sections(&sections, "sections")?;
            let document = Document {
                sections: serde_json::from_value::<Option<Vec<Section>>>(sections)?
                    .unwrap_or_default(),
                ..Document::default()
            };
            Ok(document.clauses())
        }
        other => Err(PolicyDiffError::unrecognized_shape(
            SNAPSHOT,
            format!("top-level value is {}, not a clause set", json_kind(&other)),
        )),
    }
}

fn clause_entries(entries: Vec<Value>) -> Result<Vec<Clause>> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            check_entry(&entry, &format!("clauses[{i}]"), "text", true)?;
            Ok(serde_json::from_value(entry)?)
        })
        .collect()
}

/// Check a section list and its nested sub-sections.
fn check_sections(value: &Value, path: &str) -> Result<()> {
    let sections = match value {
        Value::Null => return Ok(()),
        Value::Array(sections) => sections,
        other => {
            return Err(PolicyDiffError::invalid_value(
                path,
                format!("expected an array, found {}", json_kind(other)),
            ))
        }
    };
    for (i, section) in sections.iter().enumerate() {
        let path = format!("{path}[{i}]");
        let fields = check_entry(section, &path, "content", false)?;
        if let Some(sub_sections) = fields.get("sub_sections") {
            check_sections(sub_sections, &format!("{path}.sub_sections"))?;
        }
    }
    Ok(())
}

/// Check the types of one clause-bearing entry: `clause_id` must be a
/// string, `title` and the text field a string or null.
fn check_entry<'a>(
    entry: &'a Value,
    path: &str,
    text_field: &str,
    id_required: bool,
) -> Result<&'a Map<String, Value>> {
    let fields = entry.as_object().ok_or_else(|| {
        PolicyDiffError::invalid_value(
            path,
            format!("expected an object, found {}", json_kind(entry)),
        )
    })?;
    match fields.get("clause_id") {
        Some(Value::String(_)) => {}
        None | Some(Value::Null) if !id_required => {}
        None => {
            return Err(PolicyDiffError::invalid_value(
                format!("{path}.clause_id"),
                "clause_id is required",
            ))
        }
        Some(other) => {
            // an unquoted YAML 4.10 would read as 4.1
            return Err(PolicyDiffError::invalid_value(
                format!("{path}.clause_id"),
                format!(
                    "clause_id must be a quoted string, found {} ({other})",
                    json_kind(other)
                ),
            ));
        }
    }
    for key in ["title", text_field] {
        match fields.get(key) {
            None | Some(Value::Null | Value::String(_)) => {}
            Some(other) => {
                return Err(PolicyDiffError::invalid_value(
                    format!("{path}.{key}"),
                    format!("expected a string, found {}", json_kind(other)),
                ))
            }
        }
    }
    Ok(fields)
}

/// Load the clause list of one version snapshot.
pub fn load_clauses(path: &Path, quiet: bool) -> Result<Vec<Clause>> {
    let value = load_document_value(path)?;
    let clauses = clauses_from_value(value).with_context(|| path.display().to_string())?;
    if !quiet {
        tracing::info!("Loaded {} clauses from {}", clauses.len(), path.display());
    }
    Ok(clauses)
}

/// Check a clause set before diffing.
///
/// Duplicate ids are an error. Ids that are not dotted-numeric are returned
/// so the caller can warn about them.
pub fn validate_clause_set(clauses: &[Clause]) -> Result<Vec<ClauseId>> {
    ClauseIndex::validate_unique(clauses)?;
    Ok(clauses
        .iter()
        .filter(|c| !c.clause_id.is_well_formed())
        .map(|c| c.clause_id.clone())
        .collect())
}

/// Column label for a plan file: its stem, or the full path when it has none.
pub fn plan_label(path: &Path) -> String {
    path.file_stem().map_or_else(
        || path.display().to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    )
}

/// Load several plan documents, labelled by file stem.
pub fn load_plans(paths: &[impl AsRef<Path>], quiet: bool) -> Result<Vec<(String, Value)>> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            if !quiet {
                tracing::info!("Loading plan: {}", path.display());
            }
            load_document_value(path).map(|value| (plan_label(path), value))
        })
        .collect()
}
