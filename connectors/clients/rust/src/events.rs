// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Time-ordered events attached to key/value items.
//!
//! Events are appended to an `(collection/key, kind)` bucket and never
//! modified. Timestamps are milliseconds since the Unix epoch; the service
//! assigns an ordinal that, together with the timestamp, orders events within
//! the bucket.

use bytes::Bytes;
use http::header::LOCATION;
use orchestrate_mapping::decode::decode_events;
use orchestrate_mapping::refs::extract_event_position;
use orchestrate_mapping::{request, Error as MappingError, EventBucket, EventPosition, ResultSet};
use serde::Serialize;
use tracing::instrument;

use crate::client::{encode, Client};
use crate::error::Result;
use crate::transport::Transport;

impl<T: Transport> Client<T> {
    /// The latest events of `kind` for `collection/key`.
    pub async fn get_events(&self, collection: &str, key: &str, kind: &str) -> Result<ResultSet<EventPosition>> {
        self.fetch_events(EventBucket::new(collection, key, kind), None)
            .await
    }

    /// Events of `kind` for `collection/key` with timestamps in
    /// `[start, end]` (epoch milliseconds).
    pub async fn get_events_in_range(
        &self,
        collection: &str,
        key: &str,
        kind: &str,
        start: i64,
        end: i64,
    ) -> Result<ResultSet<EventPosition>> {
        self.fetch_events(EventBucket::new(collection, key, kind), Some((start, end)))
            .await
    }

    #[instrument(skip(self, bucket), fields(address = %bucket.address, kind = %bucket.kind))]
    async fn fetch_events(&self, bucket: EventBucket, range: Option<(i64, i64)>) -> Result<ResultSet<EventPosition>> {
        let spec = request::get_events(&bucket, range)?;
        let response = self.exchange(spec).await?;
        Ok(decode_events(&bucket, &response.body)?)
    }

    /// Append `value` as a `kind` event at the service's current time.
    ///
    /// Returns the assigned position when the service reports one in
    /// `Location`.
    pub async fn put_event<V: Serialize + ?Sized>(
        &self,
        collection: &str,
        key: &str,
        kind: &str,
        value: &V,
    ) -> Result<Option<EventPosition>> {
        self.put_event_raw(collection, key, kind, encode(value)?).await
    }

    /// [`Client::put_event`] with an already-encoded JSON body.
    pub async fn put_event_raw(
        &self,
        collection: &str,
        key: &str,
        kind: &str,
        body: impl Into<Bytes>,
    ) -> Result<Option<EventPosition>> {
        self.append_event(EventBucket::new(collection, key, kind), None, body.into())
            .await
    }

    /// Append `value` as a `kind` event at `timestamp` (epoch milliseconds).
    pub async fn put_event_at<V: Serialize + ?Sized>(
        &self,
        collection: &str,
        key: &str,
        kind: &str,
        timestamp: i64,
        value: &V,
    ) -> Result<Option<EventPosition>> {
        self.put_event_at_raw(collection, key, kind, timestamp, encode(value)?)
            .await
    }

    /// [`Client::put_event_at`] with an already-encoded JSON body.
    pub async fn put_event_at_raw(
        &self,
        collection: &str,
        key: &str,
        kind: &str,
        timestamp: i64,
        body: impl Into<Bytes>,
    ) -> Result<Option<EventPosition>> {
        self.append_event(EventBucket::new(collection, key, kind), Some(timestamp), body.into())
            .await
    }

    #[instrument(skip(self, bucket, body), fields(address = %bucket.address, kind = %bucket.kind))]
    async fn append_event(&self, bucket: EventBucket, timestamp: Option<i64>, body: Bytes) -> Result<Option<EventPosition>> {
        let spec = request::put_event(&bucket, timestamp, body)?;
        let response = self.exchange(spec).await?;

        let Some(location) = response.headers.get(LOCATION) else {
            return Ok(None);
        };
        let location = location.to_str().map_err(|_| MappingError::HeaderParsing {
            header: LOCATION.to_string(),
            value: String::from_utf8_lossy(location.as_bytes()).into_owned(),
            reason: "not visible ASCII".into(),
        })?;
        Ok(Some(extract_event_position(LOCATION.as_str(), location, &bucket)?))
    }
}
