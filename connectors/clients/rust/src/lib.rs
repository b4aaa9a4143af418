// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! # Orchestrate Client SDK
//!
//! A Rust client for Orchestrate, a hosted multi-model database exposing
//! key/value storage, graph relations and time-ordered events behind one REST
//! API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orchestrate_client::{Client, ClientConfig};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct User {
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> orchestrate_client::Result<()> {
//!     let client = Client::new(ClientConfig::from_env()?)?;
//!
//!     let written = client.put("users", "ann", &User { name: "Ann".into() }).await?;
//!     let read = client.get_at(&written).await?;
//!     let user: User = read.decode_into()?;
//!     println!("{} at ref {:?}", user.name, read.reference());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`client`]: the [`Client`], authentication, and the exchange loop.
//! - [`config`]: [`ClientConfig`] and environment loading.
//! - [`transport`]: the [`Transport`] seam and the reqwest implementation.
//! - [`kv`]: get/put/delete/purge and paginated listing.
//! - [`graph`]: relation traversal and creation.
//! - [`events`]: event append and retrieval.
//! - [`error`]: [`ClientError`] and the crate-level `Result` alias.
//!
//! Request construction and response interpretation live in
//! [`orchestrate_mapping`]; its address, envelope and cursor types are
//! re-exported here.

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod graph;
pub mod kv;
pub mod transport;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};

pub use orchestrate_mapping::{
    ContinuationToken, Envelope, EntityAddress, EventBucket, EventPosition, LinkFormat, ListPage,
    ListQuery, RawPayload, RelationAddress, RelationResult, ResultSet, ServiceError, TimedEvent,
    ValueEnvelope, WriteCondition,
};
