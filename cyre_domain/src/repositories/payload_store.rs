// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `PayloadStore` port
//!
//! Holds the latest payload and a bounded history ring per channel (spec
//! §4.6/§7), backing `Stage::DetectChanges` and `get()` queries.

use crate::entities::PayloadEntry;
use crate::value_objects::ChannelId;
use serde_json::Value;

/// Storage port for per-channel payload state.
pub trait PayloadStore: Send + Sync {
    /// Appends `entry` to `channel_id`'s history, evicting the oldest entry
    /// if the channel's history is at capacity.
    fn record(&self, channel_id: &ChannelId, entry: PayloadEntry);

    /// The most recently recorded payload value, if any.
    fn latest(&self, channel_id: &ChannelId) -> Option<Value>;

    /// The full history, oldest first.
    fn history(&self, channel_id: &ChannelId) -> Vec<PayloadEntry>;

    /// Clears all recorded state for `channel_id` (called on `forget`).
    fn clear(&self, channel_id: &ChannelId);
}
