// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Non-success responses to [`ServiceError`].
//!
//! The service describes failures as `{"message": ..., "locator": ...}`. The
//! body is decoded on a best-effort basis: if it is empty or not that shape,
//! the error still carries the HTTP status line with an empty message and
//! locator.

use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// A failure reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status_line}: {message}")]
pub struct ServiceError {
    pub status: StatusCode,
    /// e.g. `412 Precondition Failed`.
    pub status_line: String,
    /// Human-readable description. Empty if the body could not be decoded.
    pub message: String,
    /// The offending field or resource, when the service names one.
    pub locator: String,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    locator: Option<String>,
}

/// `"<code> <canonical reason>"`, or just the code for unregistered statuses.
pub fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_str()),
        None => status.as_str().to_owned(),
    }
}

/// Convert a response that did not have the operation's success status.
pub fn map_error_response(status: StatusCode, body: &[u8]) -> ServiceError {
    let decoded = if body.is_empty() {
        ErrorBody::default()
    } else {
        serde_json::from_slice::<ErrorBody>(body).unwrap_or_else(|e| {
            warn!(status = status.as_u16(), error = %e, "undecodable error body");
            ErrorBody::default()
        })
    };

    let error = ServiceError {
        status,
        status_line: status_line(status),
        message: decoded.message.unwrap_or_default(),
        locator: decoded.locator.unwrap_or_default(),
    };
    warn!(status = %error.status_line, locator = %error.locator, "service error: {}", error.message);
    error
}
