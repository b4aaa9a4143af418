// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Transport-agnostic descriptions of every request the client can make.
//!
//! Each builder validates its inputs and returns a [`RequestSpec`]: method,
//! target (path and query relative to the API root), headers, optional JSON
//! body, and the one status code that counts as success. Nothing here touches
//! the network, so every input error surfaces before a request exists.

use bytes::Bytes;
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use http::{Method, StatusCode};
use url::form_urlencoded;

use crate::address::{EntityAddress, EventBucket};
use crate::condition::{precondition_headers, WriteCondition};
use crate::error::{Error, Result};
use crate::pagination::{LinkFormat, ListPage, ListQuery};
use crate::path;
use crate::service_error::map_error_response;

/// A fully validated request, ready for a transport.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    /// Path and query relative to the API root, e.g. `users/ann/refs/r1`.
    pub target: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    /// The status the service answers with on success.
    pub success: StatusCode,
}

impl RequestSpec {
    fn new(method: Method, target: String, success: StatusCode) -> Self {
        Self {
            method,
            target,
            headers: HeaderMap::new(),
            body: None,
            success,
        }
    }

    fn with_json(mut self, body: Bytes) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(body);
        self
    }

    /// `Ok(())` for the success status, otherwise the mapped [`Error::Service`].
    pub fn check_status(&self, status: StatusCode, body: &[u8]) -> Result<()> {
        if status == self.success {
            Ok(())
        } else {
            Err(Error::Service(map_error_response(status, body)))
        }
    }
}

fn with_query(path: String, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return path;
    }
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (name, value) in pairs {
        query.append_pair(name, value);
    }
    format!("{path}?{}", query.finish())
}

// -- Key/value --------------------------------------------------------------

/// GET the latest value, or the value at the address's ref.
pub fn get_value(address: &EntityAddress) -> Result<RequestSpec> {
    Ok(RequestSpec::new(
        Method::GET,
        path::resolve_read(address)?,
        StatusCode::OK,
    ))
}

/// PUT `body` at the address's slot under `condition`.
pub fn put_value(address: &EntityAddress, condition: WriteCondition, body: Bytes) -> Result<RequestSpec> {
    let target = path::resolve_write(address)?;
    let headers = precondition_headers(condition, address)?;
    let mut spec = RequestSpec::new(Method::PUT, target, StatusCode::CREATED).with_json(body);
    spec.headers.extend(headers);
    Ok(spec)
}

/// DELETE the current value. Only `Unconditional` and `IfCurrent` are
/// meaningful for a delete.
pub fn delete_value(address: &EntityAddress, condition: WriteCondition) -> Result<RequestSpec> {
    if condition == WriteCondition::IfAbsent {
        return Err(Error::PreconditionConstruction(
            "a delete cannot be conditional on absence".into(),
        ));
    }
    let target = path::resolve_write(address)?;
    let mut spec = RequestSpec::new(Method::DELETE, target, StatusCode::NO_CONTENT);
    spec.headers = precondition_headers(condition, address)?;
    Ok(spec)
}

/// DELETE the value and its entire history.
pub fn purge(address: &EntityAddress) -> Result<RequestSpec> {
    let target = format!("{}?purge=true", path::resolve_write(address)?);
    Ok(RequestSpec::new(Method::DELETE, target, StatusCode::NO_CONTENT))
}

/// DELETE a whole collection.
pub fn delete_collection(collection: &str) -> Result<RequestSpec> {
    let target = format!("{}?force=true", path::resolve_collection(collection)?);
    Ok(RequestSpec::new(Method::DELETE, target, StatusCode::NO_CONTENT))
}

/// GET the first page of a key listing.
pub fn list(query: &ListQuery) -> Result<RequestSpec> {
    Ok(RequestSpec::new(Method::GET, query.to_target()?, StatusCode::OK))
}

/// GET the page following `page`; [`Error::NoMorePages`] on the last page.
pub fn next_page(page: &ListPage, format: &LinkFormat) -> Result<RequestSpec> {
    Ok(RequestSpec::new(
        Method::GET,
        page.next_target(format)?,
        StatusCode::OK,
    ))
}

// -- Graph ------------------------------------------------------------------

/// GET the items reached from `origin` by walking `hops` in order.
pub fn get_relations(origin: &EntityAddress, hops: &[impl AsRef<str>]) -> Result<RequestSpec> {
    Ok(RequestSpec::new(
        Method::GET,
        path::resolve_relation(origin, hops)?,
        StatusCode::OK,
    ))
}

/// PUT a `kind` edge from `source` to `sink`. The request has no body.
pub fn put_relation(source: &EntityAddress, kind: &str, sink: &EntityAddress) -> Result<RequestSpec> {
    Ok(RequestSpec::new(
        Method::PUT,
        path::resolve_relation_write(source, kind, sink)?,
        StatusCode::NO_CONTENT,
    ))
}

// -- Events -----------------------------------------------------------------

/// GET events from `bucket`, optionally bounded by `[start, end]` in epoch
/// milliseconds.
pub fn get_events(bucket: &EventBucket, range: Option<(i64, i64)>) -> Result<RequestSpec> {
    let base = path::resolve_event_bucket(bucket)?;
    let pairs = match range {
        Some((start, end)) => {
            if start > end {
                return Err(Error::InvalidQuery(format!(
                    "event range start {start} is after end {end}"
                )));
            }
            vec![("start", start.to_string()), ("end", end.to_string())]
        }
        None => Vec::new(),
    };
    Ok(RequestSpec::new(
        Method::GET,
        with_query(base, &pairs),
        StatusCode::OK,
    ))
}

/// PUT an event into `bucket`, at `timestamp` (epoch milliseconds) if given,
/// otherwise at the service's current time.
pub fn put_event(bucket: &EventBucket, timestamp: Option<i64>, body: Bytes) -> Result<RequestSpec> {
    let base = path::resolve_event_bucket(bucket)?;
    let pairs: Vec<(&str, String)> = timestamp
        .map(|t| vec![("timestamp", t.to_string())])
        .unwrap_or_default();
    Ok(RequestSpec::new(
        Method::PUT,
        with_query(base, &pairs),
        StatusCode::NO_CONTENT,
    )
    .with_json(body))
}
