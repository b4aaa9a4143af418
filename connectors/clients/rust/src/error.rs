// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Error types for the Orchestrate client SDK.
//!
//! All fallible operations in this crate return [`Result<T>`], an alias for
//! `std::result::Result<T, ClientError>`. The variants follow the lifecycle of
//! a call: input problems caught before anything is sent, transport failures,
//! non-success answers from the service, and responses that could not be
//! interpreted.

use http::StatusCode;
use orchestrate_mapping::{Error as MappingError, ServiceError};
use thiserror::Error;

use crate::transport::TransportError;

/// Everything that can go wrong in a client call.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Empty collection, key, relation hop or event kind. Nothing was sent.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Contradictory or out-of-range query parameters. Nothing was sent.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The requested write semantics cannot be expressed for this address.
    /// Nothing was sent.
    #[error("Cannot construct precondition: {0}")]
    PreconditionConstruction(String),

    /// The caller's value could not be serialized to JSON. Nothing was sent.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The service answered with a non-success status.
    #[error("Service error: {0}")]
    Service(ServiceError),

    /// A `Location`, `Content-Location` or continuation link had an
    /// unexpected shape.
    #[error("Cannot parse {header} value {value:?}: {reason}")]
    HeaderParsing {
        /// Header or body field name.
        header: String,
        /// The value as received.
        value: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A result body or payload did not match the requested shape.
    #[error("Payload decode error: {0}")]
    PayloadDecode(#[source] serde_json::Error),

    /// The page has no successor.
    #[error("No more pages")]
    NoMorePages,

    /// Invalid client configuration (base URL, credential).
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<MappingError> for ClientError {
    fn from(err: MappingError) -> Self {
        match err {
            MappingError::InvalidAddress(msg) => ClientError::InvalidAddress(msg),
            MappingError::InvalidQuery(msg) => ClientError::InvalidQuery(msg),
            MappingError::PreconditionConstruction(msg) => {
                ClientError::PreconditionConstruction(msg)
            }
            MappingError::HeaderParsing {
                header,
                value,
                reason,
            } => ClientError::HeaderParsing {
                header,
                value,
                reason,
            },
            MappingError::PayloadDecode(e) => ClientError::PayloadDecode(e),
            MappingError::NoMorePages => ClientError::NoMorePages,
            MappingError::Service(e) => ClientError::Service(e),
        }
    }
}

impl From<ServiceError> for ClientError {
    fn from(err: ServiceError) -> Self {
        ClientError::Service(err)
    }
}

impl ClientError {
    /// HTTP status of a [`ClientError::Service`] error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Service(e) => Some(e.status),
            _ => None,
        }
    }

    /// The service-side error, if this is one.
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            ClientError::Service(e) => Some(e),
            _ => None,
        }
    }

    /// True when a conditional write or delete lost its race.
    pub fn is_precondition_failed(&self) -> bool {
        self.status() == Some(StatusCode::PRECONDITION_FAILED)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Crate-level result alias using [`ClientError`].
pub type Result<T> = std::result::Result<T, ClientError>;
