// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Key listing: first-page parameters and continuation cursors.
//!
//! The service returns a `next` link with every page that has a successor.
//! That link is opaque; the only thing a client may do with it is hand it back,
//! minus the API-root prefix the service writes in front of it. The prefix is
//! described by a [`LinkFormat`] rather than assumed to be a fixed number of
//! characters.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use url::Url;

use crate::envelope::ValueEnvelope;
use crate::error::{Error, Result};
use crate::path::resolve_collection;

/// Default API root path of the hosted service.
pub const DEFAULT_LINK_PREFIX: &str = "/v0/";

const NEXT_FIELD: &str = "next";

// ---------------------------------------------------------------------------
// ListQuery
// ---------------------------------------------------------------------------

/// Parameters of the first page of a key listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub collection: String,
    /// Page size. Must be positive; the service enforces its own ceiling.
    pub limit: u32,
    /// Start strictly after this key.
    pub after_key: Option<String>,
    /// Start at this key, inclusive.
    pub start_key: Option<String>,
}

impl ListQuery {
    pub fn new(collection: impl Into<String>, limit: u32) -> Self {
        Self {
            collection: collection.into(),
            limit,
            after_key: None,
            start_key: None,
        }
    }

    pub fn after(mut self, key: impl Into<String>) -> Self {
        self.after_key = Some(key.into());
        self
    }

    pub fn starting_at(mut self, key: impl Into<String>) -> Self {
        self.start_key = Some(key.into());
        self
    }

    /// `collection?limit=N[&afterKey=k|&startKey=k]`, query form-encoded.
    pub fn to_target(&self) -> Result<String> {
        let path = resolve_collection(&self.collection)?;
        if self.limit == 0 {
            return Err(Error::InvalidQuery("limit must be positive".into()));
        }

        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("limit", &self.limit.to_string());
        match (&self.after_key, &self.start_key) {
            (Some(_), Some(_)) => {
                return Err(Error::InvalidQuery(
                    "afterKey and startKey are mutually exclusive".into(),
                ))
            }
            (Some(after), None) => {
                query.append_pair("afterKey", after);
            }
            (None, Some(start)) => {
                query.append_pair("startKey", start);
            }
            (None, None) => {}
        }
        Ok(format!("{path}?{}", query.finish()))
    }
}

// ---------------------------------------------------------------------------
// ContinuationToken / LinkFormat
// ---------------------------------------------------------------------------

/// The service's `next` link, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    pub fn new(link: impl Into<String>) -> Self {
        Self(link.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How the service writes continuation links.
///
/// Accepted shapes, all relative to `prefix`:
///
/// - `/v0/users?limit=10&afterKey=bob`
/// - `https://api.orchestrate.io/v0/users?limit=10&afterKey=bob`
/// - `</v0/users?limit=10&afterKey=bob>; rel="next"` (RFC 8288 link syntax)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkFormat {
    /// API root path the service puts in front of every link, with leading
    /// and trailing slash.
    pub prefix: String,
}

impl Default for LinkFormat {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_LINK_PREFIX.to_owned(),
        }
    }
}

impl LinkFormat {
    /// Use `prefix` as the API root, normalising slashes.
    pub fn with_prefix(prefix: &str) -> Self {
        let trimmed = prefix.trim_matches('/');
        let prefix = if trimmed.is_empty() {
            "/".to_owned()
        } else {
            format!("/{trimmed}/")
        };
        Self { prefix }
    }

    /// Derive the prefix from the path of the configured API base URL.
    pub fn from_base_url(base: &Url) -> Self {
        Self::with_prefix(base.path())
    }

    /// The request target for `token`: its path and query with the API-root
    /// prefix removed, otherwise untouched.
    pub fn resolve(&self, token: &ContinuationToken) -> Result<String> {
        let raw = token.as_str();
        let fail = |reason: &str| Error::header(NEXT_FIELD, raw, reason);

        let mut link = raw.trim();
        if let Some(rest) = link.strip_prefix('<') {
            let end = rest.find('>').ok_or_else(|| fail("unterminated `<` in link"))?;
            let params = rest[end + 1..].trim_start();
            if !params.is_empty() && !params.starts_with(';') {
                return Err(fail("unexpected text after link target"));
            }
            link = &rest[..end];
        }

        let owned;
        if let Ok(url) = Url::parse(link) {
            owned = match url.query() {
                Some(q) => format!("{}?{q}", url.path()),
                None => url.path().to_owned(),
            };
            link = &owned;
        }

        let target = link
            .strip_prefix(self.prefix.as_str())
            .ok_or_else(|| fail(&format!("link does not start with {:?}", self.prefix)))?;
        if target.is_empty() {
            return Err(fail("link has nothing after the API root"));
        }
        Ok(target.to_owned())
    }
}

// ---------------------------------------------------------------------------
// ListPage
// ---------------------------------------------------------------------------

/// One page of a key listing.
#[derive(Debug, Clone)]
pub struct ListPage {
    /// Number of items on this page, as reported by the service.
    pub count: u64,
    pub items: Vec<ValueEnvelope>,
    /// Absent on the last page.
    pub continuation: Option<ContinuationToken>,
}

impl ListPage {
    pub fn has_next(&self) -> bool {
        self.continuation.is_some()
    }

    /// Request target of the page after this one.
    ///
    /// Fails with [`Error::NoMorePages`] on the last page; no request needs to
    /// be made to find that out.
    pub fn next_target(&self, format: &LinkFormat) -> Result<String> {
        let token = self.continuation.as_ref().ok_or(Error::NoMorePages)?;
        format.resolve(token)
    }
}
