#![no_main]
use libfuzzer_sys::fuzz_target;

// Splits the input at the first NUL into old and new text.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (old, new) = s.split_once('\0').unwrap_or((s, ""));
        let h = policy_diff::highlight_modification(old, new);
        assert_eq!(h.old_tokens.len(), old.split_whitespace().count());
    }
});
