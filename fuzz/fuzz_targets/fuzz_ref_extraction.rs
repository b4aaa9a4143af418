// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Fuzz target for Location / Content-Location parsing.
// Run with: cargo +nightly fuzz run fuzz_ref_extraction

#![no_main]

use libfuzzer_sys::fuzz_target;
use orchestrate_mapping::refs::{extract_event_position, extract_ref};
use orchestrate_mapping::EventBucket;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = std::str::from_utf8(data) {
        if value.len() <= 4096 {
            // Any ref that comes back must be a single non-empty segment.
            if let Ok(reference) = extract_ref("location", value) {
                assert!(!reference.is_empty());
                assert!(!reference.contains('/'));
            }

            let bucket = EventBucket::new("users", "ann", "login");
            if let Ok(position) = extract_event_position("location", value, &bucket) {
                assert_eq!(position.bucket, bucket);
            }
        }
    }
});
