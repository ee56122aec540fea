//! Property-based tests for the diff, highlight and normalization laws.
//!
//! Clause sets are drawn from a small vocabulary so that shared ids and
//! shared words are common across the two sides.

use policy_diff::{
    diff::{diff_versions, highlight_modification, VersionDiffer},
    model::Clause,
    normalize::{normalize_fields, FieldSchema},
};
use proptest::prelude::*;
use serde_json::Value;
use std::collections::HashSet;

const WORDS: &[&str] = &[
    "30", "90", "days", "covered", "room", "rent", "1%", "2%", "of", "sum", "insured",
];

const KEYS: &[&str] = &[
    "policy",
    "sections",
    "sub_sections",
    "title",
    "content",
    "insurer",
    "sum_insured",
    "network_hospitals",
    "Room Rent",
    "other",
];

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..6).prop_map(|w| w.join(" "))
}

/// Clause lists with unique ids, in generation order.
fn clauses_strategy() -> impl Strategy<Value = Vec<Clause>> {
    prop::collection::vec(
        ("[1-6](\\.[1-3]){0,1}", "[A-Z][a-z]{0,8}", text_strategy()),
        0..10,
    )
    .prop_map(|items| {
        let mut seen = HashSet::new();
        items
            .into_iter()
            .filter(|(id, _, _)| seen.insert(id.clone()))
            .map(|(id, title, text)| Clause::new(id, title, text))
            .collect()
    })
}

fn json_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "\\PC{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec((prop::sample::select(KEYS), inner), 0..5).prop_map(
                |entries| {
                    Value::Object(
                        entries
                            .into_iter()
                            .map(|(k, v)| (k.to_string(), v))
                            .collect(),
                    )
                }
            ),
        ]
    })
}

fn ids<'a>(clauses: impl IntoIterator<Item = &'a Clause>) -> Vec<&'a str> {
    clauses.into_iter().map(|c| c.clause_id.as_str()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn diff_against_itself_is_empty(clauses in clauses_strategy()) {
        let result = diff_versions(&clauses, &clauses);
        prop_assert!(!result.has_changes());
        prop_assert_eq!(VersionDiffer::new(&clauses, &clauses).unchanged_count(), clauses.len());
    }

    #[test]
    fn every_id_lands_in_exactly_one_bucket(
        old in clauses_strategy(),
        new in clauses_strategy(),
    ) {
        let differ = VersionDiffer::new(&old, &new);
        let (result, summary) = differ.diff_with_summary();

        let mut all_ids: HashSet<&str> = ids(&old).into_iter().collect();
        all_ids.extend(ids(&new));

        let mut bucketed = HashSet::new();
        for (id, _) in result.changed_ids() {
            prop_assert!(bucketed.insert(id.as_str()), "{} in two buckets", id);
        }
        prop_assert_eq!(bucketed.len() + summary.unchanged, all_ids.len());

        for clause in &result.added {
            prop_assert!(!ids(&old).contains(&clause.clause_id.as_str()));
        }
        for clause in &result.removed {
            prop_assert!(!ids(&new).contains(&clause.clause_id.as_str()));
        }
        for modified in &result.modified {
            prop_assert_ne!(&modified.old_text, &modified.new_text);
        }
    }

    #[test]
    fn buckets_follow_document_order(
        old in clauses_strategy(),
        new in clauses_strategy(),
    ) {
        let result = diff_versions(&old, &new);
        let new_order = ids(&new);
        let old_order = ids(&old);

        let positions = |order: &[&str], bucket: Vec<&str>| -> Vec<usize> {
            bucket
                .iter()
                .filter_map(|id| order.iter().position(|o| o == id))
                .collect()
        };
        let added = positions(&new_order, ids(&result.added));
        let removed = positions(&old_order, ids(&result.removed));
        let modified = positions(
            &new_order,
            result.modified.iter().map(|m| m.clause_id.as_str()).collect(),
        );
        prop_assert!(added.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(removed.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(modified.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn swapping_versions_swaps_added_and_removed(
        old in clauses_strategy(),
        new in clauses_strategy(),
    ) {
        let forward = diff_versions(&old, &new);
        let backward = diff_versions(&new, &old);

        prop_assert_eq!(ids(&forward.added), ids(&backward.removed));
        prop_assert_eq!(ids(&forward.removed), ids(&backward.added));

        let forward_modified: HashSet<_> =
            forward.modified.iter().map(|m| (m.clause_id.as_str(), &m.old_text, &m.new_text)).collect();
        let backward_modified: HashSet<_> =
            backward.modified.iter().map(|m| (m.clause_id.as_str(), &m.new_text, &m.old_text)).collect();
        prop_assert_eq!(forward_modified, backward_modified);
    }

    #[test]
    fn highlight_tags_words_missing_from_other_side(
        old_text in text_strategy(),
        new_text in text_strategy(),
    ) {
        let h = highlight_modification(&old_text, &new_text);
        let old_words: Vec<&str> = old_text.split_whitespace().collect();
        let new_words: Vec<&str> = new_text.split_whitespace().collect();

        let tagged_old: Vec<&str> = h.old_tokens.iter().map(|t| t.word.as_str()).collect();
        let tagged_new: Vec<&str> = h.new_tokens.iter().map(|t| t.word.as_str()).collect();
        prop_assert_eq!(&tagged_old, &old_words);
        prop_assert_eq!(&tagged_new, &new_words);

        for token in &h.old_tokens {
            prop_assert_eq!(token.exclusive, !new_words.contains(&token.word.as_str()));
        }
        for token in &h.new_tokens {
            prop_assert_eq!(token.exclusive, !old_words.contains(&token.word.as_str()));
        }
    }

    #[test]
    fn highlight_of_identical_text_has_no_exclusive_words(text in text_strategy()) {
        prop_assert!(!highlight_modification(&text, &text).has_exclusive());
    }

    #[test]
    fn normalization_is_total(document in json_strategy()) {
        let field_count = FieldSchema::default().fields.len();
        if let Some(record) = normalize_fields(&document) {
            prop_assert_eq!(record.len(), field_count);
        }
    }

    #[test]
    fn objects_without_known_keys_are_comparison_ready(
        entries in prop::collection::vec(
            (prop::sample::select(&["title", "content", "other", "Room Rent"][..]), json_strategy()),
            0..5,
        ),
    ) {
        let document = Value::Object(
            entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        );
        prop_assert!(normalize_fields(&document).is_some());
    }

    #[test]
    fn non_objects_are_not_comparison_ready(
        document in prop_oneof![
            Just(Value::Null),
            "\\PC{0,12}".prop_map(Value::String),
            any::<f64>().prop_map(Value::from),
            prop::collection::vec(json_strategy(), 0..4).prop_map(Value::Array),
        ],
    ) {
        prop_assert!(normalize_fields(&document).is_none());
    }
}
