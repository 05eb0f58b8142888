// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! In-memory adapters implementing `cyre_domain`'s repository ports. A
//! distributed-delivery or durable-store adapter would live alongside these
//! behind the same ports; neither is in scope here.

pub mod in_memory_channel_store;
pub mod in_memory_payload_store;
pub mod in_memory_subscription_registry;

pub use in_memory_channel_store::InMemoryChannelStore;
pub use in_memory_payload_store::{HistoryConfig, InMemoryPayloadStore};
pub use in_memory_subscription_registry::InMemorySubscriptionRegistry;
