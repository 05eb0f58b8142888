// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `ChannelStore` port
//!
//! Holds compiled channels keyed by id. Implementations are expected to be
//! `Send + Sync` and internally synchronized (spec §7's single-writer/
//! many-reader model): methods take `&self`, not `&mut self`, so a single
//! `Arc<dyn ChannelStore>` can be shared across the call engine, the
//! compiler, and the presentation layer.

use crate::entities::CompiledChannel;
use crate::error::CyreError;
use crate::value_objects::ChannelId;

/// Storage port for compiled channels.
pub trait ChannelStore: Send + Sync {
    /// Inserts or replaces the channel at `channel.id`.
    fn upsert(&self, channel: CompiledChannel) -> Result<(), CyreError>;

    /// Returns a clone of the compiled channel, if registered.
    fn get(&self, id: &ChannelId) -> Option<CompiledChannel>;

    /// Removes and returns the channel, if it was registered.
    fn remove(&self, id: &ChannelId) -> Option<CompiledChannel>;

    fn contains(&self, id: &ChannelId) -> bool;

    /// All registered channel ids, in no particular order.
    fn all_ids(&self) -> Vec<ChannelId>;
}
