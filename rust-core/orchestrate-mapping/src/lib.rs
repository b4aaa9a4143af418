// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! # Orchestrate request mapping
//!
//! The part of the Orchestrate client with real contracts: turning logical
//! operations into HTTP requests, and HTTP responses back into typed results.
//! There is no I/O in this crate; `orchestrate-client` supplies the transport.
//!
//! ```rust
//! use orchestrate_mapping::{request, EntityAddress, WriteCondition};
//!
//! let addr = EntityAddress::at_ref("users", "ann", "82eafab14dc84ed3");
//! let spec = request::put_value(&addr, WriteCondition::IfCurrent, "{}".into()).unwrap();
//! assert_eq!(spec.target, "users/ann");
//! assert_eq!(spec.headers["if-match"], "\"82eafab14dc84ed3\"");
//! ```
//!
//! ## Modules
//!
//! - [`address`]: entity, relation and event addresses.
//! - [`path`]: path construction.
//! - [`condition`]: `If-Match` / `If-None-Match` preconditions.
//! - [`refs`]: refs and event positions from `Location` headers.
//! - [`pagination`]: list queries and continuation links.
//! - [`envelope`] / [`decode`]: result envelopes with deferred payload decode.
//! - [`service_error`]: non-success responses.
//! - [`request`]: per-operation [`RequestSpec`] builders.

pub mod address;
pub mod condition;
pub mod decode;
pub mod envelope;
pub mod error;
pub mod pagination;
pub mod path;
pub mod refs;
pub mod request;
pub mod service_error;

pub use address::{EntityAddress, EventBucket, EventPosition, RelationAddress};
pub use condition::WriteCondition;
pub use envelope::{Envelope, RawPayload, RelationResult, ResultSet, TimedEvent, ValueEnvelope};
pub use error::{Error, Result};
pub use pagination::{ContinuationToken, LinkFormat, ListPage, ListQuery};
pub use request::RequestSpec;
pub use service_error::ServiceError;
