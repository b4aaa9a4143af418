// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Graph relations between key/value items.
//!
//! A relation is a named, directed edge from one `collection/key` to another.
//! Traversals follow an ordered list of relation kinds (hops) and return the
//! items at the end of the walk.

use orchestrate_mapping::decode::decode_relations;
use orchestrate_mapping::{request, EntityAddress, RelationAddress, ResultSet};
use tracing::instrument;

use crate::client::Client;
use crate::error::Result;
use crate::transport::Transport;

impl<T: Transport> Client<T> {
    /// Items reached from `collection/key` by following `hops` in order.
    ///
    /// `["friends", "colleagues"]` returns the colleagues of the item's
    /// friends.
    #[instrument(skip(self, hops), fields(hops = hops.len()))]
    pub async fn get_relations<S: AsRef<str>>(
        &self,
        collection: &str,
        key: &str,
        hops: &[S],
    ) -> Result<ResultSet<RelationAddress>> {
        let origin = EntityAddress::new(collection, key);
        let spec = request::get_relations(&origin, hops)?;
        let response = self.exchange(spec).await?;

        let hops: Vec<String> = hops.iter().map(|h| h.as_ref().to_owned()).collect();
        Ok(decode_relations(&origin, &hops, &response.body)?)
    }

    /// Create a `kind` relation from `source_collection/source_key` to
    /// `sink_collection/sink_key`.
    #[instrument(skip(self))]
    pub async fn put_relation(
        &self,
        source_collection: &str,
        source_key: &str,
        kind: &str,
        sink_collection: &str,
        sink_key: &str,
    ) -> Result<()> {
        let spec = request::put_relation(
            &EntityAddress::new(source_collection, source_key),
            kind,
            &EntityAddress::new(sink_collection, sink_key),
        )?;
        self.exchange(spec).await?;
        Ok(())
    }
}
