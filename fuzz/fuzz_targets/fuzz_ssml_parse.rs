#![no_main]
use libfuzzer_sys::fuzz_target;
use ssmloxide::parser::{parse_markup, parse_ssml_bytes, ParseOptions};

fuzz_target!(|data: &[u8]| {
    let opts = ParseOptions::default();
    // Neither entry point may panic on arbitrary input.
    let _ = parse_ssml_bytes(data, &opts);
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_markup(s, &opts);
    }
});
