//! Diff result structures.

use crate::model::{Clause, ClauseId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clause-level changes between two versions of a document.
///
/// Every clause id appears in at most one bucket. Ids present in both
/// versions with identical text appear in none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct DiffResult {
    /// Clauses only in the new version, in new-version order
    pub added: Vec<Clause>,
    /// Clauses only in the old version, in old-version order
    pub removed: Vec<Clause>,
    /// Clauses whose text changed, in new-version order
    pub modified: Vec<ModifiedClause>,
}

impl DiffResult {
    /// Check if there are any changes
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.total_changes() > 0
    }

    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    /// All changed ids with their change type: added, removed, then modified.
    pub fn changed_ids(&self) -> impl Iterator<Item = (&ClauseId, ChangeType)> {
        self.added
            .iter()
            .map(|c| (&c.clause_id, ChangeType::Added))
            .chain(self.removed.iter().map(|c| (&c.clause_id, ChangeType::Removed)))
            .chain(
                self.modified
                    .iter()
                    .map(|m| (&m.clause_id, ChangeType::Modified)),
            )
    }
}

/// A clause present in both versions whose text differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedClause {
    pub clause_id: ClauseId,
    /// Title as it appears in the new version
    pub title: String,
    pub old_text: String,
    pub new_text: String,
}

/// Type of change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Removed => write!(f, "removed"),
            Self::Modified => write!(f, "modified"),
        }
    }
}

/// Summary counts for a version comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    /// Ids present in both versions with identical text
    pub unchanged: usize,
    pub total_changes: usize,
}

impl DiffSummary {
    pub fn from_result(result: &DiffResult, unchanged: usize) -> Self {
        Self {
            added: result.added.len(),
            removed: result.removed.len(),
            modified: result.modified.len(),
            unchanged,
            total_changes: result.total_changes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> DiffResult {
        DiffResult {
            added: vec![Clause::new("6.5", "Mental Health", "Covered")],
            removed: vec![Clause::new("6.1", "Maternity", "Covered")],
            modified: vec![ModifiedClause {
                clause_id: ClauseId::from("4.1"),
                title: "Initial Waiting Period".into(),
                old_text: "90 days".into(),
                new_text: "30 days".into(),
            }],
        }
    }

    #[test]
    fn test_changed_ids_in_bucket_order() {
        let result = result();
        let changed: Vec<_> = result
            .changed_ids()
            .map(|(id, kind)| (id.as_str(), kind))
            .collect();
        assert_eq!(
            changed,
            vec![
                ("6.5", ChangeType::Added),
                ("6.1", ChangeType::Removed),
                ("4.1", ChangeType::Modified),
            ]
        );
    }

    #[test]
    fn test_summary_counts() {
        let summary = DiffSummary::from_result(&result(), 4);
        assert_eq!(summary.total_changes, 3);
        assert_eq!(summary.unchanged, 4);
        assert!(result().has_changes());
        assert!(!DiffResult::default().has_changes());
    }

    #[test]
    fn test_change_type_serializes_lowercase() {
        let json = serde_json::to_string(&ChangeType::Modified).unwrap();
        assert_eq!(json, "\"modified\"");
    }
}
