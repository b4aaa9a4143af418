// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Key/value operations.
//!
//! Values live at `collection/key`. Every write creates a new immutable ref;
//! reads return the ref they observed so that a later write can be made
//! conditional on it (optimistic concurrency via `If-Match`).

use bytes::Bytes;
use http::header::{CONTENT_LOCATION, LOCATION};
use orchestrate_mapping::decode::{decode_list_page, decode_value};
use orchestrate_mapping::refs::ref_from_headers;
use orchestrate_mapping::{request, EntityAddress, ListPage, ListQuery, ValueEnvelope, WriteCondition};
use serde::Serialize;
use tracing::instrument;

use crate::client::{encode, Client};
use crate::error::Result;
use crate::transport::Transport;

impl<T: Transport> Client<T> {
    // -- Reads --------------------------------------------------------------

    /// Read the latest value at `collection/key`.
    ///
    /// The returned envelope's address carries the ref the service served,
    /// taken from `Content-Location`.
    pub async fn get(&self, collection: &str, key: &str) -> Result<ValueEnvelope> {
        self.get_at(&EntityAddress::new(collection, key)).await
    }

    /// Read the value at `address`: the pinned ref if it has one, otherwise
    /// the latest.
    ///
    /// # Errors
    ///
    /// [`ClientError::Service`](crate::ClientError::Service) with status 404 if
    /// there is no such value; [`ClientError::HeaderParsing`](crate::ClientError::HeaderParsing)
    /// if a latest read comes back without a usable `Content-Location`.
    #[instrument(skip(self), fields(address = %address))]
    pub async fn get_at(&self, address: &EntityAddress) -> Result<ValueEnvelope> {
        let spec = request::get_value(address)?;
        let response = self.exchange(spec).await?;

        let resolved = if address.is_pinned() {
            address.clone()
        } else {
            let reference = ref_from_headers(&response.headers, &CONTENT_LOCATION)?;
            address.latest().with_ref(reference)
        };
        Ok(decode_value(resolved, response.body))
    }

    // -- Writes -------------------------------------------------------------

    /// Store `value` at `collection/key`, replacing whatever is there.
    ///
    /// Returns the address of the new version.
    pub async fn put<V: Serialize + ?Sized>(&self, collection: &str, key: &str, value: &V) -> Result<EntityAddress> {
        self.put_raw(collection, key, encode(value)?).await
    }

    /// [`Client::put`] with an already-encoded JSON body.
    pub async fn put_raw(&self, collection: &str, key: &str, body: impl Into<Bytes>) -> Result<EntityAddress> {
        self.put_with(&EntityAddress::new(collection, key), WriteCondition::Unconditional, body.into())
            .await
    }

    /// Store `value` only if `address.reference` is still the latest ref.
    ///
    /// A lost race surfaces as a 412 service error
    /// ([`ClientError::is_precondition_failed`](crate::ClientError::is_precondition_failed)).
    pub async fn put_if_current<V: Serialize + ?Sized>(&self, address: &EntityAddress, value: &V) -> Result<EntityAddress> {
        self.put_if_current_raw(address, encode(value)?).await
    }

    /// [`Client::put_if_current`] with an already-encoded JSON body.
    pub async fn put_if_current_raw(&self, address: &EntityAddress, body: impl Into<Bytes>) -> Result<EntityAddress> {
        self.put_with(address, WriteCondition::IfCurrent, body.into()).await
    }

    /// Store `value` only if `collection/key` holds nothing yet.
    pub async fn put_if_absent<V: Serialize + ?Sized>(&self, collection: &str, key: &str, value: &V) -> Result<EntityAddress> {
        self.put_if_absent_raw(collection, key, encode(value)?).await
    }

    /// [`Client::put_if_absent`] with an already-encoded JSON body.
    pub async fn put_if_absent_raw(&self, collection: &str, key: &str, body: impl Into<Bytes>) -> Result<EntityAddress> {
        self.put_with(&EntityAddress::new(collection, key), WriteCondition::IfAbsent, body.into())
            .await
    }

    /// Store `body` at `address` under `condition`.
    ///
    /// A pinned address is only accepted with [`WriteCondition::IfCurrent`];
    /// pass `address.latest()` to overwrite blindly.
    #[instrument(skip(self, body), fields(address = %address, bytes = body.len()))]
    pub async fn put_with(&self, address: &EntityAddress, condition: WriteCondition, body: Bytes) -> Result<EntityAddress> {
        let spec = request::put_value(address, condition, body)?;
        let response = self.exchange(spec).await?;
        let reference = ref_from_headers(&response.headers, &LOCATION)?;
        Ok(address.latest().with_ref(reference))
    }

    // -- Deletes ------------------------------------------------------------

    /// Delete the value at `collection/key`. History is kept.
    pub async fn delete(&self, collection: &str, key: &str) -> Result<()> {
        self.delete_with(&EntityAddress::new(collection, key), WriteCondition::Unconditional)
            .await
    }

    /// Delete only if `address.reference` is still the latest ref.
    pub async fn delete_if_current(&self, address: &EntityAddress) -> Result<()> {
        self.delete_with(address, WriteCondition::IfCurrent).await
    }

    #[instrument(skip(self), fields(address = %address))]
    async fn delete_with(&self, address: &EntityAddress, condition: WriteCondition) -> Result<()> {
        let spec = request::delete_value(address, condition)?;
        self.exchange(spec).await?;
        Ok(())
    }

    /// Delete the value at `collection/key` together with all its refs.
    #[instrument(skip(self))]
    pub async fn purge(&self, collection: &str, key: &str) -> Result<()> {
        let spec = request::purge(&EntityAddress::new(collection, key))?;
        self.exchange(spec).await?;
        Ok(())
    }

    /// Delete an entire collection.
    #[instrument(skip(self))]
    pub async fn delete_collection(&self, collection: &str) -> Result<()> {
        let spec = request::delete_collection(collection)?;
        self.exchange(spec).await?;
        Ok(())
    }

    // -- Listing ------------------------------------------------------------

    /// First page of a key-ordered listing.
    ///
    /// ```rust,no_run
    /// # use orchestrate_client::{Client, ListQuery};
    /// # async fn demo(client: Client) -> orchestrate_client::Result<()> {
    /// let mut page = client.list(&ListQuery::new("users", 100).after("m")).await?;
    /// loop {
    ///     for item in &page.items {
    ///         println!("{}", item.address);
    ///     }
    ///     if !page.has_next() {
    ///         break;
    ///     }
    ///     page = client.list_next(&page).await?;
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(collection = %query.collection, limit = query.limit))]
    pub async fn list(&self, query: &ListQuery) -> Result<ListPage> {
        let spec = request::list(query)?;
        let response = self.exchange(spec).await?;
        Ok(decode_list_page(&response.body)?)
    }

    /// The page after `page`.
    ///
    /// Fails with [`ClientError::NoMorePages`](crate::ClientError::NoMorePages),
    /// without contacting the service, if `page` was the last one.
    #[instrument(skip(self, page), fields(count = page.count))]
    pub async fn list_next(&self, page: &ListPage) -> Result<ListPage> {
        let spec = request::next_page(page, self.link_format())?;
        let response = self.exchange(spec).await?;
        Ok(decode_list_page(&response.body)?)
    }
}
