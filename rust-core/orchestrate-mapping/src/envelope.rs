// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Result envelopes: where a payload was read from, plus the payload itself
//! left undecoded.
//!
//! Key/value reads, relation traversals and event batches share one shape,
//! [`Envelope<A>`], parameterised by the address kind. Metadata (`ref`,
//! ordinal, timestamp) is available immediately; the payload is only decoded
//! when the caller asks for a concrete type with [`Envelope::decode_into`].

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::address::{EntityAddress, EventPosition, RelationAddress};
use crate::error::Result;

/// A payload exactly as the service sent it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawPayload(Bytes);

impl RawPayload {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A payload positioned by an address of kind `A`.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<A> {
    pub address: A,
    payload: RawPayload,
}

impl<A> Envelope<A> {
    pub fn new(address: A, payload: RawPayload) -> Self {
        Self { address, payload }
    }

    pub fn payload(&self) -> &RawPayload {
        &self.payload
    }

    pub fn into_parts(self) -> (A, RawPayload) {
        (self.address, self.payload)
    }

    /// Decode the payload as `T`.
    ///
    /// A mismatch is reported as [`crate::Error::PayloadDecode`]; the envelope
    /// itself is not touched and can be decoded again as another type.
    pub fn decode_into<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(self.payload.as_bytes())?)
    }
}

/// A value read from `collection/key`, with the ref it was read at.
pub type ValueEnvelope = Envelope<EntityAddress>;

/// An item reached through a relation traversal.
pub type RelationResult = Envelope<RelationAddress>;

/// One event from an `(address, kind)` bucket.
pub type TimedEvent = Envelope<EventPosition>;

impl ValueEnvelope {
    /// The ref the value was read at.
    pub fn reference(&self) -> Option<&str> {
        self.address.ref_str()
    }
}

/// A batch of envelopes with the service-reported count.
#[derive(Debug, Clone)]
pub struct ResultSet<A> {
    pub count: u64,
    pub items: Vec<Envelope<A>>,
}

impl<A> ResultSet<A> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Envelope<A>> {
        self.items.iter()
    }
}

impl<A> IntoIterator for ResultSet<A> {
    type Item = Envelope<A>;
    type IntoIter = std::vec::IntoIter<Envelope<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
