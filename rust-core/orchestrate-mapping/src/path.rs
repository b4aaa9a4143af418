// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Path construction for every addressable resource.
//!
//! Paths are relative to the API root (no leading slash) and are built by
//! plain concatenation. Segments are expected to be path-safe already; nothing
//! here percent-encodes. Empty segments and the dot segments `.` and `..` are
//! rejected.

use crate::address::{EntityAddress, EventBucket};
use crate::error::{Error, Result};

const REFS: &str = "refs";
const RELATIONS: &str = "relations";
const RELATION: &str = "relation";
const EVENTS: &str = "events";

fn require(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidAddress(format!("{what} must not be empty")));
    }
    // URL resolution would fold these into a different resource.
    if value == "." || value == ".." {
        return Err(Error::InvalidAddress(format!(
            "{what} {value:?} is a dot segment"
        )));
    }
    Ok(())
}

fn slot(address: &EntityAddress) -> Result<String> {
    require("collection", &address.collection)?;
    require("key", &address.key)?;
    Ok(format!("{}/{}", address.collection, address.key))
}

/// `collection`
pub fn resolve_collection(collection: &str) -> Result<String> {
    require("collection", collection)?;
    Ok(collection.to_owned())
}

/// `collection/key`, or `collection/key/refs/<ref>` when the address is pinned.
pub fn resolve_read(address: &EntityAddress) -> Result<String> {
    let base = slot(address)?;
    Ok(match address.ref_str() {
        Some(r) => {
            require("ref", r)?;
            format!("{base}/{REFS}/{r}")
        }
        None => base,
    })
}

/// Always `collection/key`: writes target the live slot and the service
/// assigns the new ref.
pub fn resolve_write(address: &EntityAddress) -> Result<String> {
    slot(address)
}

/// `collection/key/relations/hop1/hop2/...` for a traversal read.
pub fn resolve_relation(source: &EntityAddress, hops: &[impl AsRef<str>]) -> Result<String> {
    let base = slot(source)?;
    if hops.is_empty() {
        return Err(Error::InvalidAddress(
            "relation traversal needs at least one hop".into(),
        ));
    }
    let mut path = format!("{base}/{RELATIONS}");
    for hop in hops {
        let hop = hop.as_ref();
        require("relation hop", hop)?;
        path.push('/');
        path.push_str(hop);
    }
    Ok(path)
}

/// `source/key/relation/kind/sinkCollection/sinkKey` for creating one edge.
pub fn resolve_relation_write(
    source: &EntityAddress,
    kind: &str,
    sink: &EntityAddress,
) -> Result<String> {
    let from = slot(source)?;
    require("relation kind", kind)?;
    let to = slot(sink)?;
    Ok(format!("{from}/{RELATION}/{kind}/{to}"))
}

/// `collection/key/events/kind`
pub fn resolve_event_bucket(bucket: &EventBucket) -> Result<String> {
    let base = slot(&bucket.address)?;
    require("event kind", &bucket.kind)?;
    Ok(format!("{base}/{EVENTS}/{}", bucket.kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_latest() {
        let addr = EntityAddress::new("users", "alice");
        assert_eq!(resolve_read(&addr).unwrap(), "users/alice");
    }

    #[test]
    fn test_read_pinned() {
        let addr = EntityAddress::at_ref("users", "alice", "0eb6e0d3a1e8f5a4");
        assert_eq!(
            resolve_read(&addr).unwrap(),
            "users/alice/refs/0eb6e0d3a1e8f5a4"
        );
    }

    #[test]
    fn test_write_ignores_ref() {
        let addr = EntityAddress::at_ref("users", "alice", "abc");
        assert_eq!(resolve_write(&addr).unwrap(), "users/alice");
    }

    #[test]
    fn test_empty_segments_rejected() {
        assert!(matches!(
            resolve_read(&EntityAddress::new("", "k")),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(
            resolve_write(&EntityAddress::new("c", "")),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(resolve_collection(""), Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn test_dot_segments_rejected() {
        for (collection, key) in [("users", ".."), ("..", "ann"), (".", "ann"), ("users", ".")] {
            assert!(matches!(
                resolve_write(&EntityAddress::new(collection, key)),
                Err(Error::InvalidAddress(_))
            ));
        }
        assert!(matches!(
            resolve_read(&EntityAddress::at_ref("users", "ann", "..")),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(
            resolve_relation(&EntityAddress::new("users", "ann"), &["friends", ".."]),
            Err(Error::InvalidAddress(_))
        ));
        assert!(resolve_event_bucket(&EventBucket::new("users", "ann", ".")).is_err());
        // Dots inside a segment are ordinary characters.
        assert_eq!(
            resolve_write(&EntityAddress::new("users", "a..b")).unwrap(),
            "users/a..b"
        );
    }

    #[test]
    fn test_multi_hop_relation() {
        let addr = EntityAddress::new("people", "ann");
        assert_eq!(
            resolve_relation(&addr, &["friends", "colleagues"]).unwrap(),
            "people/ann/relations/friends/colleagues"
        );
    }

    #[test]
    fn test_relation_needs_hops() {
        let addr = EntityAddress::new("people", "ann");
        let none: [&str; 0] = [];
        assert!(matches!(
            resolve_relation(&addr, &none),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(
            resolve_relation(&addr, &["friends", ""]),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_relation_write_is_singular() {
        let src = EntityAddress::new("people", "ann");
        let sink = EntityAddress::new("companies", "acme");
        assert_eq!(
            resolve_relation_write(&src, "employer", &sink).unwrap(),
            "people/ann/relation/employer/companies/acme"
        );
    }

    #[test]
    fn test_event_bucket() {
        let bucket = EventBucket::new("people", "ann", "checkin");
        assert_eq!(
            resolve_event_bucket(&bucket).unwrap(),
            "people/ann/events/checkin"
        );
        let unnamed = EventBucket::new("people", "ann", "");
        assert!(resolve_event_bucket(&unnamed).is_err());
    }
}
