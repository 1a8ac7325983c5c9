#![no_main]

use libfuzzer_sys::fuzz_target;
use streamcore::{Encoding, UString, utf8};

fuzz_target!(|data: &[u8]| {
    let (code_points, report) = utf8::decode(data, utf8::REPLACEMENT_CHARACTER);
    if let Ok(text) = core::str::from_utf8(data) {
        assert!(!report.has_errors());
        assert!(code_points.iter().copied().eq(text.chars().map(u32::from)));
    }
    if report == utf8::DecodeReport::default() {
        assert_eq!(utf8::encode(&code_points), data);
    }

    let string = UString::decode(data, Encoding::Ascii);
    assert_eq!(string.len(), data.len());
});
