// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! In-memory [`ChannelStore`] adapter, backed by a [`cyre_domain::services::PathIndex`]
//! kept in lockstep with the channel map so path-based lookups never drift
//! from the registered channels (spec §7 bullet 5: a detected mismatch
//! triggers [`PathIndex::rebuild_from`] rather than serving stale matches).

use cyre_domain::entities::CompiledChannel;
use cyre_domain::error::CyreError;
use cyre_domain::repositories::ChannelStore;
use cyre_domain::services::PathIndex;
use cyre_domain::value_objects::ChannelId;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::error;

/// The default, single-process `ChannelStore` implementation.
#[derive(Default)]
pub struct InMemoryChannelStore {
    channels: RwLock<HashMap<ChannelId, CompiledChannel>>,
    paths: RwLock<PathIndex>,
}

impl InMemoryChannelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every channel id registered under a path matching `pattern`
    /// (supports `*`/`**`).
    pub fn match_path(&self, pattern: &str) -> Vec<ChannelId> {
        self.paths.read().match_pattern(pattern)
    }

    /// Re-derives the path index from the channel map. Called when a caller
    /// observes the two structures disagreeing; logs rather than panicking,
    /// since a stale index degrades wildcard matching without corrupting
    /// direct channel lookups.
    fn self_heal(&self) {
        error!("channel store and path index diverged; rebuilding path index");
        let snapshot: Vec<(ChannelId, cyre_domain::value_objects::ChannelPath)> = self
            .channels
            .read()
            .values()
            .filter_map(|c| c.path.clone().map(|p| (c.id.clone(), p)))
            .collect();
        if let Err(e) = self.paths.write().rebuild_from(snapshot) {
            error!(error = %e, "path index rebuild failed");
        }
    }
}

impl ChannelStore for InMemoryChannelStore {
    fn upsert(&self, channel: CompiledChannel) -> Result<(), CyreError> {
        let id = channel.id.clone();
        let path = channel.path.clone();
        self.channels.write().insert(id.clone(), channel);
        if let Some(path) = path {
            self.paths.write().add(id, path);
        }
        if self.paths.read().len() > self.channels.read().len() {
            self.self_heal();
        }
        Ok(())
    }

    fn get(&self, id: &ChannelId) -> Option<CompiledChannel> {
        self.channels.read().get(id).cloned()
    }

    fn remove(&self, id: &ChannelId) -> Option<CompiledChannel> {
        self.paths.write().remove(id);
        self.channels.write().remove(id)
    }

    fn contains(&self, id: &ChannelId) -> bool {
        self.channels.read().contains_key(id)
    }

    fn all_ids(&self) -> Vec<ChannelId> {
        self.channels.read().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyre_domain::services::compile;
    use cyre_domain::services::ChannelConfig;

    fn channel(id: &str, path: Option<&str>) -> CompiledChannel {
        compile(ChannelConfig { id: id.into(), path: path.map(String::from), ..Default::default() }).unwrap().0
    }

    #[test]
    fn upsert_then_get_round_trips() {
        let store = InMemoryChannelStore::new();
        store.upsert(channel("a", None)).unwrap();
        assert!(store.get(&ChannelId::new("a").unwrap()).is_some());
    }

    #[test]
    fn path_match_reflects_registered_channel() {
        let store = InMemoryChannelStore::new();
        store.upsert(channel("a", Some("sensors/kitchen/temperature"))).unwrap();
        assert_eq!(store.match_path("sensors/**"), vec![ChannelId::new("a").unwrap()]);
    }

    #[test]
    fn remove_clears_both_indexes() {
        let store = InMemoryChannelStore::new();
        store.upsert(channel("a", Some("sensors/kitchen/temperature"))).unwrap();
        store.remove(&ChannelId::new("a").unwrap());
        assert!(store.match_path("sensors/**").is_empty());
        assert!(!store.contains(&ChannelId::new("a").unwrap()));
    }
}
