//! Fuzzing target for target key patterns
//!
//! Any pattern text must either compile or return an error, and a compiled
//! pattern must be safe to test against arbitrary keys.

#![no_main]

use libfuzzer_sys::fuzz_target;
use schematics_core::PathPattern;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let (pattern, key) = text.split_once('\n').unwrap_or((text.as_ref(), ""));

    for separator in [".", "/", "*", "\\", "[", "::"] {
        if let Ok(compiled) = PathPattern::compile(pattern, separator) {
            let _ = compiled.test(key);
            let _ = compiled.captures(key);
            // A pattern without wildcards always matches its own text
            if !compiled.has_wildcards() {
                assert!(compiled.test(pattern));
            }
        }
    }
});
