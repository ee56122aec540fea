//! Clause identity and the declaration-ordered clause lookup.

use crate::error::{PolicyDiffError, Result};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Dotted numeric clause identifier, e.g. `4.2` or `4.2.1`.
///
/// Identity is the exact string: `4.10` and `4.1` are different clauses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClauseId(String);

impl ClauseId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id has the dotted numeric form (`6`, `6.1`, `6.1.3`).
    ///
    /// The differ never requires this; it is checked by `validate` only.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        static DOTTED: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^\d+(\.\d+)*$").expect("static regex"));
        DOTTED.is_match(&self.0)
    }
}

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClauseId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ClauseId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An identifiable, numbered unit of policy text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub clause_id: ClauseId,
    #[serde(default, deserialize_with = "super::document::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "super::document::null_as_default")]
    pub text: String,
}

impl Clause {
    pub fn new(
        clause_id: impl Into<ClauseId>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            clause_id: clause_id.into(),
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Lookup from clause id to clause for one document version.
///
/// Iteration follows declaration order. A duplicated id keeps the position
/// of its first occurrence and the value of its last one; uniqueness is a
/// caller precondition checked separately by [`ClauseIndex::validate_unique`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ClauseIndex<'a> {
    by_id: IndexMap<&'a ClauseId, &'a Clause>,
}

impl<'a> ClauseIndex<'a> {
    /// Build the index in O(n).
    pub fn build(clauses: &'a [Clause]) -> Self {
        let mut by_id = IndexMap::with_capacity(clauses.len());
        for clause in clauses {
            by_id.insert(&clause.clause_id, clause);
        }
        Self { by_id }
    }

    #[must_use]
    pub fn get(&self, id: &ClauseId) -> Option<&'a Clause> {
        self.by_id.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &ClauseId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Clauses in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Clause> + '_ {
        self.by_id.values().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Ids that occur more than once, each reported once, in order of
    /// their second occurrence.
    #[must_use]
    pub fn duplicates(clauses: &[Clause]) -> Vec<ClauseId> {
        let mut seen = HashSet::with_capacity(clauses.len());
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for clause in clauses {
            if !seen.insert(&clause.clause_id) && reported.insert(&clause.clause_id) {
                duplicates.push(clause.clause_id.clone());
            }
        }
        duplicates
    }

    /// Upstream uniqueness check for a clause set about to be diffed.
    pub fn validate_unique(clauses: &[Clause]) -> Result<()> {
        let duplicates = Self::duplicates(clauses);
        if duplicates.is_empty() {
            Ok(())
        } else {
            Err(PolicyDiffError::InvalidClauseSet { duplicates })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_id_well_formed() {
        assert!(ClauseId::from("4").is_well_formed());
        assert!(ClauseId::from("4.2").is_well_formed());
        assert!(ClauseId::from("4.2.1").is_well_formed());
        assert!(!ClauseId::from("4.").is_well_formed());
        assert!(!ClauseId::from("A.1").is_well_formed());
        assert!(!ClauseId::from("").is_well_formed());
    }

    #[test]
    fn test_index_preserves_declaration_order() {
        let clauses = vec![
            Clause::new("6.1", "Maternity", "covered"),
            Clause::new("2.1", "Definitions", "..."),
            Clause::new("4.2", "Hospitalization", "covered"),
        ];
        let index = ClauseIndex::build(&clauses);
        let ids: Vec<_> = index.iter().map(|c| c.clause_id.as_str()).collect();
        assert_eq!(ids, vec!["6.1", "2.1", "4.2"]);
        assert_eq!(index.len(), 3);
        assert!(index.contains(&ClauseId::from("2.1")));
        assert!(index.get(&ClauseId::from("9.9")).is_none());
    }

    #[test]
    fn test_duplicate_ids_last_write_wins() {
        let clauses = vec![
            Clause::new("1.1", "First", "old"),
            Clause::new("1.2", "Second", "x"),
            Clause::new("1.1", "First again", "new"),
        ];
        let index = ClauseIndex::build(&clauses);
        assert_eq!(index.len(), 2);
        let first = index.get(&ClauseId::from("1.1")).unwrap();
        assert_eq!(first.text, "new");
        // position of the first occurrence is kept
        assert_eq!(index.iter().next().unwrap().clause_id.as_str(), "1.1");
    }

    #[test]
    fn test_validate_unique() {
        let ok = vec![Clause::new("1", "a", "a"), Clause::new("2", "b", "b")];
        assert!(ClauseIndex::validate_unique(&ok).is_ok());

        let bad = vec![
            Clause::new("1", "a", "a"),
            Clause::new("1", "a", "b"),
            Clause::new("1", "a", "c"),
        ];
        match ClauseIndex::validate_unique(&bad) {
            Err(PolicyDiffError::InvalidClauseSet { duplicates }) => {
                assert_eq!(duplicates, vec![ClauseId::from("1")]);
            }
            other => panic!("expected InvalidClauseSet, got {other:?}"),
        }
    }
}
