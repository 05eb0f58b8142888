// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `Subscription`
//!
//! A channel may have at most one active subscriber (spec §6): calling `on`
//! again for the same channel id replaces the previous handler rather than
//! adding a second one. The handler closure itself is not domain data — it
//! lives behind the [`crate::repositories::handler::Handler`] port and is
//! owned by a [`crate::repositories::subscription_registry::SubscriptionRegistry`]
//! adapter. `Subscription` is the metadata record the registry keeps
//! alongside that handler.

use crate::value_objects::ChannelId;

/// Metadata for a channel's single active subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub channel_id: ChannelId,
}

impl Subscription {
    pub fn new(channel_id: ChannelId) -> Self {
        Self { channel_id }
    }
}
