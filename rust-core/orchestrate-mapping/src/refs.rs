// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Version identifiers carried in response headers.
//!
//! After a write the service answers with `Location: /v0/<col>/<key>/refs/<ref>`;
//! after a read of the latest value it sends `Content-Location` with the same
//! shape. An event append answers with
//! `Location: /v0/<col>/<key>/events/<kind>/<timestamp>/<ordinal>`.
//!
//! Segments are located by their marker counting from the end: the last `refs`
//! before the final segment, or `events` exactly four segments from the end.
//! A key or kind literally named like a marker cannot shadow it. The number of
//! leading segments (API version, host, proxies) is irrelevant.

use http::header::{HeaderMap, HeaderName};
use url::Url;

use crate::address::{EventBucket, EventPosition};
use crate::error::{Error, Result};

const REFS_MARKER: &str = "refs";
const EVENTS_MARKER: &str = "events";

/// The path component of a header value that may be an absolute URL or a
/// bare path, without query or fragment and without trailing slashes.
fn path_of(value: &str) -> String {
    let value = value.trim();
    let path = match Url::parse(value) {
        Ok(url) => url.path().to_owned(),
        Err(_) => value
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_owned(),
    };
    path.trim_end_matches('/').to_owned()
}

/// Extract the ref from a `Location` / `Content-Location` value.
///
/// Returns the segment immediately after the last `refs` marker. Fails with
/// [`Error::HeaderParsing`] when there is no marker, the marker is the final
/// segment, or the following segment is empty.
pub fn extract_ref(header: &str, value: &str) -> Result<String> {
    let path = path_of(value);
    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len().saturating_sub(1);

    let marker = segments[..last]
        .iter()
        .rposition(|s| *s == REFS_MARKER)
        .ok_or_else(|| {
            let reason = if segments.last() == Some(&REFS_MARKER) {
                "`refs` is the final segment"
            } else {
                "no `refs` segment"
            };
            Error::header(header, value, reason)
        })?;

    let reference = segments[marker + 1];
    if reference.is_empty() {
        return Err(Error::header(header, value, "empty ref segment"));
    }
    Ok(reference.to_owned())
}

/// Look `name` up in `headers` and extract the ref from it.
///
/// A missing or non-ASCII header is a parse failure: the service always sends
/// one on the responses this is used for.
pub fn ref_from_headers(headers: &HeaderMap, name: &HeaderName) -> Result<String> {
    let raw = headers
        .get(name)
        .ok_or_else(|| Error::header(name.as_str(), "", "header missing from response"))?;
    let value = raw
        .to_str()
        .map_err(|_| Error::header(name.as_str(), &String::from_utf8_lossy(raw.as_bytes()), "not visible ASCII"))?;
    extract_ref(name.as_str(), value)
}

/// Parse the `Location` returned by an event append into the event's
/// position inside `bucket`.
///
/// Expects `.../events/<kind>/<timestamp>/<ordinal>` with `kind` equal to the
/// bucket's kind and both numbers unsigned integers.
pub fn extract_event_position(header: &str, value: &str, bucket: &EventBucket) -> Result<EventPosition> {
    let path = path_of(value);
    let segments: Vec<&str> = path.split('/').collect();

    // The marker sits at a fixed distance from the end; the kind or key may
    // itself be named `events`.
    let marker = segments
        .len()
        .checked_sub(4)
        .filter(|&i| segments[i] == EVENTS_MARKER)
        .ok_or_else(|| {
            Error::header(header, value, "expected `events/<kind>/<timestamp>/<ordinal>` suffix")
        })?;

    let kind = segments[marker + 1];
    if kind != bucket.kind {
        return Err(Error::header(
            header,
            value,
            format!("event kind {kind:?} does not match bucket kind {:?}", bucket.kind),
        ));
    }
    let timestamp = segments[marker + 2]
        .parse::<u64>()
        .map_err(|e| Error::header(header, value, format!("timestamp: {e}")))?;
    let ordinal = segments[marker + 3]
        .parse::<u64>()
        .map_err(|e| Error::header(header, value, format!("ordinal: {e}")))?;

    Ok(EventPosition {
        bucket: bucket.clone(),
        timestamp,
        ordinal,
    })
}
