// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! In-memory [`PayloadStore`] adapter: one bounded [`PayloadHistory`] ring
//! per channel.

use cyre_domain::entities::{PayloadEntry, PayloadHistory};
use cyre_domain::repositories::PayloadStore;
use cyre_domain::value_objects::ChannelId;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Configuration for per-channel payload history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 10 }
    }
}

pub struct InMemoryPayloadStore {
    config: HistoryConfig,
    entries: RwLock<HashMap<ChannelId, PayloadHistory>>,
}

impl InMemoryPayloadStore {
    pub fn new(config: HistoryConfig) -> Self {
        Self { config, entries: RwLock::new(HashMap::new()) }
    }
}

impl Default for InMemoryPayloadStore {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl PayloadStore for InMemoryPayloadStore {
    fn record(&self, channel_id: &ChannelId, entry: PayloadEntry) {
        self.entries
            .write()
            .entry(channel_id.clone())
            .or_insert_with(|| PayloadHistory::new(self.config.capacity))
            .push(entry);
    }

    fn latest(&self, channel_id: &ChannelId) -> Option<Value> {
        self.entries.read().get(channel_id).and_then(|h| h.latest()).map(|e| e.value.clone())
    }

    fn history(&self, channel_id: &ChannelId) -> Vec<PayloadEntry> {
        self.entries.read().get(channel_id).map(|h| h.iter().cloned().collect()).unwrap_or_default()
    }

    fn clear(&self, channel_id: &ChannelId) {
        self.entries.write().remove(channel_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyre_domain::entities::PayloadSource;
    use serde_json::json;

    #[test]
    fn records_and_returns_latest() {
        let store = InMemoryPayloadStore::default();
        let id = ChannelId::new("a").unwrap();
        store.record(&id, PayloadEntry { value: json!(1), source: PayloadSource::Call, recorded_at_ms: 1 });
        store.record(&id, PayloadEntry { value: json!(2), source: PayloadSource::Call, recorded_at_ms: 2 });
        assert_eq!(store.latest(&id), Some(json!(2)));
        assert_eq!(store.history(&id).len(), 2);
    }

    #[test]
    fn clear_removes_history() {
        let store = InMemoryPayloadStore::default();
        let id = ChannelId::new("a").unwrap();
        store.record(&id, PayloadEntry { value: json!(1), source: PayloadSource::Call, recorded_at_ms: 1 });
        store.clear(&id);
        assert_eq!(store.latest(&id), None);
    }
}
