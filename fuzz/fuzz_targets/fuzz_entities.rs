#![no_main]
use libfuzzer_sys::fuzz_target;
use ssmloxide::util::{escape, unescape};

fuzz_target!(|data: &str| {
    let escaped = escape(data);
    assert!(!escaped.contains('<') && !escaped.contains('>'));
    assert_eq!(unescape(&escaped), data);
});
