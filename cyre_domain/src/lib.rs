// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Cyre Domain
//!
//! Pure domain layer for Cyre, an in-process reactive action bus: channel
//! registration and compilation, the hierarchical path index, the payload
//! change detector, and the repository/handler ports that `cyre`'s
//! infrastructure adapters implement.
//!
//! This crate performs no I/O and owns no async runtime. It is organized the
//! way Clean Architecture/DDD separates a domain layer from its adapters:
//!
//! - [`value_objects`] — small, self-validating, identity-less types
//!   (`ChannelId`, `ChannelPath`, `FormationId`, `CallId`, `Priority`,
//!   `Repeat`, `CyreResponse`).
//! - [`entities`] — objects with identity and a lifecycle (`CompiledChannel`,
//!   `Formation`, `Subscription`, payload history, breathing snapshots).
//! - [`services`] — pure algorithms that don't belong to one entity
//!   (the channel compiler, the path index, change detection).
//! - [`repositories`] — ports infrastructure implements (`ChannelStore`,
//!   `SubscriptionRegistry`, `PayloadStore`, `Handler`).
//! - [`events`] — notable state transitions raised for logging/metrics.
//! - [`error`] — the [`error::CyreError`] taxonomy every fallible operation
//!   in this crate returns.

pub mod entities;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use error::CyreError;
