//! Word-level change markers for a modified clause.
//!
//! This is a set difference over whitespace-separated tokens, not an
//! alignment: a reordered word is unchanged on both sides, and a word whose
//! occurrence count changed is not highlighted.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One whitespace-delimited token and whether the other side lacks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedWord {
    pub word: String,
    pub exclusive: bool,
}

/// Old and new renderings of a modified clause, token by token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedText {
    pub old_tokens: Vec<TaggedWord>,
    pub new_tokens: Vec<TaggedWord>,
}

impl HighlightedText {
    /// Tokens only on the old side.
    pub fn removed_words(&self) -> impl Iterator<Item = &str> {
        exclusive_words(&self.old_tokens)
    }

    /// Tokens only on the new side.
    pub fn added_words(&self) -> impl Iterator<Item = &str> {
        exclusive_words(&self.new_tokens)
    }

    #[must_use]
    pub fn has_exclusive(&self) -> bool {
        self.old_tokens
            .iter()
            .chain(&self.new_tokens)
            .any(|t| t.exclusive)
    }
}

fn exclusive_words(tokens: &[TaggedWord]) -> impl Iterator<Item = &str> {
    tokens
        .iter()
        .filter(|t| t.exclusive)
        .map(|t| t.word.as_str())
}

/// Tag each token of `old_text` and `new_text` that is absent from the other
/// side. Tokens are split on whitespace and compared exactly.
pub fn highlight_modification(old_text: &str, new_text: &str) -> HighlightedText {
    let old_words: HashSet<&str> = old_text.split_whitespace().collect();
    let new_words: HashSet<&str> = new_text.split_whitespace().collect();

    HighlightedText {
        old_tokens: tag(old_text, &new_words),
        new_tokens: tag(new_text, &old_words),
    }
}

fn tag(text: &str, other: &HashSet<&str>) -> Vec<TaggedWord> {
    text.split_whitespace()
        .map(|word| TaggedWord {
            word: word.to_string(),
            exclusive: !other.contains(word),
        })
        .collect()
}
