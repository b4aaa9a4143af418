// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Error types for the request-mapping layer.
//!
//! Input-validation variants ([`Error::InvalidAddress`], [`Error::InvalidQuery`],
//! [`Error::PreconditionConstruction`]) are raised while a request is being
//! built, before anything reaches the network. The remaining variants describe
//! responses that could not be interpreted.

use thiserror::Error;

use crate::service_error::ServiceError;

/// Failure modes of building requests and interpreting responses.
#[derive(Debug, Error)]
pub enum Error {
    /// A collection, key, relation hop or event kind was empty.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// List parameters were contradictory or out of range.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The requested write semantics cannot be expressed as HTTP preconditions
    /// for the given address.
    #[error("cannot construct precondition: {0}")]
    PreconditionConstruction(String),

    /// A `Location`, `Content-Location` or continuation link did not have the
    /// documented shape.
    #[error("cannot parse {header} value {value:?}: {reason}")]
    HeaderParsing {
        /// Header (or body field) the value came from.
        header: String,
        /// The offending value, verbatim.
        value: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A payload or result body did not match the requested shape.
    #[error("payload decode failed: {0}")]
    PayloadDecode(#[from] serde_json::Error),

    /// The current page carries no continuation token.
    #[error("no more pages")]
    NoMorePages,

    /// The service answered with a non-success status.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl Error {
    pub(crate) fn header(header: &str, value: &str, reason: impl Into<String>) -> Self {
        Error::HeaderParsing {
            header: header.to_owned(),
            value: value.to_owned(),
            reason: reason.into(),
        }
    }

    /// True for errors raised before any request was sent.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidAddress(_) | Error::InvalidQuery(_) | Error::PreconditionConstruction(_)
        )
    }
}

/// Crate-level result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_parsing_display() {
        let err = Error::header("Location", "/v0/col/key", "missing `refs` segment");
        let msg = err.to_string();
        assert!(msg.contains("Location"));
        assert!(msg.contains("/v0/col/key"));
        assert!(msg.contains("refs"));
    }

    #[test]
    fn test_input_errors_classified() {
        assert!(Error::InvalidAddress("empty key".into()).is_input_error());
        assert!(Error::InvalidQuery("limit".into()).is_input_error());
        assert!(Error::PreconditionConstruction("no ref".into()).is_input_error());
        assert!(!Error::NoMorePages.is_input_error());
    }

    #[test]
    fn test_no_more_pages_display() {
        assert_eq!(Error::NoMorePages.to_string(), "no more pages");
    }
}
