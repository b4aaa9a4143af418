// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Successful response bodies to envelopes.
//!
//! Batch bodies have the shape `{"count": n, "results": [...], "next": "..."}`.
//! Only that outer structure is parsed; each item's `value` is captured as raw
//! JSON text and handed to an [`Envelope`] undecoded.

use bytes::Bytes;
use serde::Deserialize;
use serde_json::value::RawValue;

use crate::address::{EntityAddress, EventBucket, EventPosition, RelationAddress};
use crate::envelope::{Envelope, RawPayload, ResultSet, ValueEnvelope};
use crate::error::Result;
use crate::pagination::{ContinuationToken, ListPage};

#[derive(Deserialize)]
struct Batch<T> {
    #[serde(default)]
    count: Option<u64>,
    #[serde(default = "Vec::new")]
    results: Vec<T>,
    #[serde(default)]
    next: Option<String>,
}

#[derive(Deserialize)]
struct PathItem {
    path: EntityAddress,
    #[serde(default)]
    value: Option<Box<RawValue>>,
}

#[derive(Deserialize)]
struct EventItem {
    ordinal: u64,
    timestamp: u64,
    #[serde(default)]
    value: Option<Box<RawValue>>,
}

fn raw(value: Option<Box<RawValue>>) -> RawPayload {
    match value {
        Some(v) => RawPayload::new(Bytes::copy_from_slice(v.get().as_bytes())),
        None => RawPayload::new(Bytes::from_static(b"null")),
    }
}

fn parse<T: for<'de> Deserialize<'de>>(body: &[u8]) -> Result<Batch<T>> {
    Ok(serde_json::from_slice(body)?)
}

/// A single-value read. The body is the payload; nothing is parsed.
pub fn decode_value(address: EntityAddress, body: Bytes) -> ValueEnvelope {
    Envelope::new(address, RawPayload::new(body))
}

/// A key-listing page.
pub fn decode_list_page(body: &[u8]) -> Result<ListPage> {
    let batch: Batch<PathItem> = parse(body)?;
    let items: Vec<ValueEnvelope> = batch
        .results
        .into_iter()
        .map(|item| Envelope::new(item.path, raw(item.value)))
        .collect();
    Ok(ListPage {
        count: batch.count.unwrap_or(items.len() as u64),
        items,
        continuation: batch
            .next
            .filter(|n| !n.trim().is_empty())
            .map(ContinuationToken::new),
    })
}

/// The items reached from `origin` by walking `hops`.
pub fn decode_relations(
    origin: &EntityAddress,
    hops: &[String],
    body: &[u8],
) -> Result<ResultSet<RelationAddress>> {
    let batch: Batch<PathItem> = parse(body)?;
    let items: Vec<_> = batch
        .results
        .into_iter()
        .map(|item| {
            let address = RelationAddress {
                origin: origin.clone(),
                hops: hops.to_vec(),
                item: item.path,
            };
            Envelope::new(address, raw(item.value))
        })
        .collect();
    Ok(ResultSet {
        count: batch.count.unwrap_or(items.len() as u64),
        items,
    })
}

/// A batch of events from `bucket`, in the order the service returned them.
pub fn decode_events(bucket: &EventBucket, body: &[u8]) -> Result<ResultSet<EventPosition>> {
    let batch: Batch<EventItem> = parse(body)?;
    let items: Vec<_> = batch
        .results
        .into_iter()
        .map(|item| {
            let position = EventPosition {
                bucket: bucket.clone(),
                timestamp: item.timestamp,
                ordinal: item.ordinal,
            };
            Envelope::new(position, raw(item.value))
        })
        .collect();
    Ok(ResultSet {
        count: batch.count.unwrap_or(items.len() as u64),
        items,
    })
}
