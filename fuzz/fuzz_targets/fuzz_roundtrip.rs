#![no_main]
use libfuzzer_sys::fuzz_target;
use ssmloxide::parser::{parse_markup, ParseOptions};
use ssmloxide::serial::{serialize_with_options, SerializeOptions};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let opts = ParseOptions::default();
        // Parse -> serialize -> parse must reproduce the same tree.
        if let Ok(root) = parse_markup(s, &opts) {
            for collapse in [false, true] {
                let ser = SerializeOptions::default().collapse_empty(collapse);
                let output = serialize_with_options(&root, &ser);
                let reparsed = parse_markup(&output, &opts)
                    .unwrap_or_else(|e| panic!("reparse failed: {e}\n{output}"));
                assert_eq!(root, reparsed);
            }
        }
    }
});
