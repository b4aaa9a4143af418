// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Optimistic-concurrency preconditions for writes and deletes.
//!
//! | Condition       | Header                 |
//! |-----------------|------------------------|
//! | `Unconditional` | none                   |
//! | `IfAbsent`      | `If-None-Match: "*"`   |
//! | `IfCurrent`     | `If-Match: "<ref>"`    |
//!
//! The service uses entity-tag quoting, so the ref is wrapped in double quotes
//! verbatim.

use http::header::{HeaderMap, HeaderValue, IF_MATCH, IF_NONE_MATCH};

use crate::address::EntityAddress;
use crate::error::{Error, Result};

/// Desired semantics of a PUT or DELETE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteCondition {
    /// Overwrite (or delete) whatever is there.
    #[default]
    Unconditional,
    /// Create only; fail if the key already holds a value.
    IfAbsent,
    /// Only if the current ref equals the address's ref.
    IfCurrent,
}

/// Headers to attach to a write against `address` under `condition`.
///
/// An address pinned to a ref is only accepted together with
/// [`WriteCondition::IfCurrent`]; `IfCurrent` in turn requires one.
pub fn precondition_headers(condition: WriteCondition, address: &EntityAddress) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    match condition {
        WriteCondition::Unconditional | WriteCondition::IfAbsent => {
            if let Some(r) = address.ref_str() {
                return Err(Error::PreconditionConstruction(format!(
                    "{address} is pinned to ref {r:?}; use an if-current write or target {}",
                    address.latest()
                )));
            }
            if condition == WriteCondition::IfAbsent {
                headers.insert(IF_NONE_MATCH, HeaderValue::from_static("\"*\""));
            }
        }
        WriteCondition::IfCurrent => {
            let r = address.ref_str().ok_or_else(|| {
                Error::PreconditionConstruction(format!(
                    "if-current write to {address} needs a ref"
                ))
            })?;
            let value = HeaderValue::from_str(&format!("\"{r}\"")).map_err(|_| {
                Error::PreconditionConstruction(format!("ref {r:?} is not a valid entity tag"))
            })?;
            headers.insert(IF_MATCH, value);
        }
    }
    Ok(headers)
}
