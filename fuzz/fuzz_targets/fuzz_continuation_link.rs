// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Fuzz target for `next` link resolution.
// Run with: cargo +nightly fuzz run fuzz_continuation_link

#![no_main]

use libfuzzer_sys::fuzz_target;
use orchestrate_mapping::{ContinuationToken, LinkFormat};

fuzz_target!(|data: &[u8]| {
    if let Ok(link) = std::str::from_utf8(data) {
        if link.len() <= 4096 {
            let format = LinkFormat::default();
            if let Ok(target) = format.resolve(&ContinuationToken::new(link)) {
                assert!(!target.is_empty());
            }
        }
    }
});
