//! Clause-identity diff between two document versions.

use super::{DiffResult, DiffSummary, ModifiedClause};
use crate::model::{Clause, ClauseIndex};

/// Differ over two indexed clause lists.
///
/// Clause ids are expected to be unique within each list; with duplicates
/// the last occurrence wins. Text equality is exact and is the only change
/// predicate: a title-only edit is not a modification.
#[derive(Debug, Clone)]
pub struct VersionDiffer<'a> {
    old: ClauseIndex<'a>,
    new: ClauseIndex<'a>,
}

impl<'a> VersionDiffer<'a> {
    /// Index both versions. O(n + m).
    pub fn new(old: &'a [Clause], new: &'a [Clause]) -> Self {
        Self {
            old: ClauseIndex::build(old),
            new: ClauseIndex::build(new),
        }
    }

    /// Classify every clause id into added, removed or modified.
    pub fn diff(&self) -> DiffResult {
        let mut result = DiffResult::default();

        for clause in self.new.iter() {
            match self.old.get(&clause.clause_id) {
                None => result.added.push(clause.clone()),
                Some(previous) if previous.text != clause.text => {
                    result.modified.push(ModifiedClause {
                        clause_id: clause.clause_id.clone(),
                        title: clause.title.clone(),
                        old_text: previous.text.clone(),
                        new_text: clause.text.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        result.removed = self
            .old
            .iter()
            .filter(|clause| !self.new.contains(&clause.clause_id))
            .cloned()
            .collect();

        tracing::debug!(
            added = result.added.len(),
            removed = result.removed.len(),
            modified = result.modified.len(),
            "clause diff complete"
        );
        result
    }

    /// Ids present in both versions with identical text.
    #[must_use]
    pub fn unchanged_count(&self) -> usize {
        self.new
            .iter()
            .filter(|clause| {
                self.old
                    .get(&clause.clause_id)
                    .is_some_and(|previous| previous.text == clause.text)
            })
            .count()
    }

    /// Diff plus summary counts.
    pub fn diff_with_summary(&self) -> (DiffResult, DiffSummary) {
        let result = self.diff();
        let summary = DiffSummary::from_result(&result, self.unchanged_count());
        (result, summary)
    }
}

/// Diff two clause lists.
pub fn diff_versions(old: &[Clause], new: &[Clause]) -> DiffResult {
    VersionDiffer::new(old, new).diff()
}
