// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `SubscriptionRegistry` port
//!
//! Maps a channel id to its single active [`Handler`]. Subscribing again for
//! the same channel id replaces the previous handler (spec §6).

use crate::error::CyreError;
use crate::repositories::handler::Handler;
use crate::value_objects::ChannelId;
use std::sync::Arc;

/// Storage port for channel subscriptions.
pub trait SubscriptionRegistry: Send + Sync {
    /// Registers `handler` as the (sole) subscriber for `channel_id`,
    /// replacing any previous subscriber.
    fn subscribe(&self, channel_id: ChannelId, handler: Arc<dyn Handler>) -> Result<(), CyreError>;

    /// Removes the subscriber for `channel_id`. Returns `true` if one was
    /// present.
    fn unsubscribe(&self, channel_id: &ChannelId) -> bool;

    /// Returns the current subscriber for `channel_id`, if any.
    fn get(&self, channel_id: &ChannelId) -> Option<Arc<dyn Handler>>;

    fn has_subscriber(&self, channel_id: &ChannelId) -> bool;
}
