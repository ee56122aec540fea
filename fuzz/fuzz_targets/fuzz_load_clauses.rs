#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz clause snapshot extraction and a self-diff of the result.
fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        if let Ok(clauses) = policy_diff::pipeline::clauses_from_value(value) {
            let _ = policy_diff::pipeline::validate_clause_set(&clauses);
            assert!(!policy_diff::diff_versions(&clauses, &clauses).has_changes());
        }
    }
});
