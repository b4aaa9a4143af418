// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Address kinds for the three sub-APIs.
//!
//! Every result the service returns is positioned by one of these:
//! [`EntityAddress`] for key/value reads, [`RelationAddress`] for graph
//! traversals, and [`EventPosition`] for events inside an [`EventBucket`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EntityAddress
// ---------------------------------------------------------------------------

/// Identifies a value: `collection/key`, optionally pinned to one historical
/// write by its `ref`.
///
/// A missing (or empty) `ref` means "the current version". A pinned address
/// is read-only context: it may be read, or used as the source of an
/// `If-Match` precondition, but it is not a valid target for an unconditional
/// write. Use [`EntityAddress::latest`] to state that intent explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityAddress {
    /// Collection name.
    pub collection: String,
    /// Key within the collection.
    pub key: String,
    /// Opaque version token assigned by the service.
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl EntityAddress {
    /// Address of the latest value at `collection/key`.
    pub fn new(collection: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            key: key.into(),
            reference: None,
        }
    }

    /// Address pinned to a specific `ref`.
    pub fn at_ref(
        collection: impl Into<String>,
        key: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self::new(collection, key).with_ref(reference)
    }

    /// Replace the ref, consuming `self`.
    pub fn with_ref(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// The same slot with the ref dropped.
    pub fn latest(&self) -> Self {
        Self::new(self.collection.clone(), self.key.clone())
    }

    /// The ref, treating an empty string as absent.
    pub fn ref_str(&self) -> Option<&str> {
        self.reference.as_deref().filter(|r| !r.is_empty())
    }

    /// Whether this address names one historical write.
    pub fn is_pinned(&self) -> bool {
        self.ref_str().is_some()
    }
}

impl fmt::Display for EntityAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ref_str() {
            Some(r) => write!(f, "{}/{}@{}", self.collection, self.key, r),
            None => write!(f, "{}/{}", self.collection, self.key),
        }
    }
}

// ---------------------------------------------------------------------------
// RelationAddress
// ---------------------------------------------------------------------------

/// Position of an item reached by walking relations from an origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationAddress {
    /// Where the traversal started.
    pub origin: EntityAddress,
    /// Relation kinds walked, in order.
    pub hops: Vec<String>,
    /// The related item, as reported by the service.
    pub item: EntityAddress,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// The `(address, kind)` bucket events are appended to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventBucket {
    /// Owning value. Any ref on it is ignored.
    pub address: EntityAddress,
    /// Event type name.
    pub kind: String,
}

impl EventBucket {
    pub fn new(
        collection: impl Into<String>,
        key: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            address: EntityAddress::new(collection, key),
            kind: kind.into(),
        }
    }
}

/// Where one event sits in its bucket.
///
/// `(timestamp, ordinal)` is a stable total order within a bucket; the ordinal
/// is assigned by the service and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPosition {
    pub bucket: EventBucket,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub ordinal: u64,
}

impl EventPosition {
    /// Sort key within the bucket.
    pub fn order_key(&self) -> (u64, u64) {
        (self.timestamp, self.ordinal)
    }

    /// The timestamp as a UTC instant, if representable.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.timestamp)
            .ok()
            .and_then(DateTime::from_timestamp_millis)
    }
}
