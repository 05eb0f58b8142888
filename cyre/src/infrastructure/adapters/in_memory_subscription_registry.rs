// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! In-memory [`SubscriptionRegistry`] adapter: one handler per channel.

use cyre_domain::error::CyreError;
use cyre_domain::repositories::{Handler, SubscriptionRegistry};
use cyre_domain::value_objects::ChannelId;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct InMemorySubscriptionRegistry {
    handlers: RwLock<HashMap<ChannelId, Arc<dyn Handler>>>,
}

impl InMemorySubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubscriptionRegistry for InMemorySubscriptionRegistry {
    fn subscribe(&self, channel_id: ChannelId, handler: Arc<dyn Handler>) -> Result<(), CyreError> {
        self.handlers.write().insert(channel_id, handler);
        Ok(())
    }

    fn unsubscribe(&self, channel_id: &ChannelId) -> bool {
        self.handlers.write().remove(channel_id).is_some()
    }

    fn get(&self, channel_id: &ChannelId) -> Option<Arc<dyn Handler>> {
        self.handlers.read().get(channel_id).cloned()
    }

    fn has_subscriber(&self, channel_id: &ChannelId) -> bool {
        self.handlers.read().contains_key(channel_id)
    }
}
