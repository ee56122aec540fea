#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz field normalization.
///
/// Any JSON document must normalize to a full record or to `None`, never
/// panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(document) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = policy_diff::normalize_fields(&document);
    }
});
