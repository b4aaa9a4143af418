// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Fuzz target for batch response bodies (listings, traversals, events).
// Run with: cargo +nightly fuzz run fuzz_batch_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use orchestrate_mapping::decode::{decode_events, decode_list_page, decode_relations};
use orchestrate_mapping::{EntityAddress, EventBucket};

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }

    if let Ok(page) = decode_list_page(data) {
        // Payloads are captured verbatim, never re-parsed here.
        for item in &page.items {
            let _ = item.payload().len();
        }
    }

    let origin = EntityAddress::new("users", "ann");
    let _ = decode_relations(&origin, &["friends".to_string()], data);
    let _ = decode_events(&EventBucket::new("users", "ann", "login"), data);
});
