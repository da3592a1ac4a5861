//! Fuzzing target for rebuilding nested values from flat keys
//!
//! Arbitrary key sets must deflate or fail with an error, never panic or
//! allocate without bound. Values that deflate must survive a round trip.

#![no_main]

use libfuzzer_sys::fuzz_target;
use schematics_core::{deflate, flatten, FlatView};
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let view: FlatView = text
        .lines()
        .enumerate()
        .map(|(i, key)| (key.to_string(), Value::from(i)))
        .collect();

    if let Ok(nested) = deflate(&view, ".") {
        let again = flatten(&nested, "", ".");
        let _ = deflate(&again, ".");
    }

    if let Ok(parsed) = serde_json::from_slice::<Value>(data) {
        let flat = flatten(&parsed, "", ".");
        let _ = deflate(&flat, ".");
    }
});
