// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Entities: domain objects with identity and a lifecycle, as opposed to the
//! pure-value [`crate::value_objects`].

pub mod breathing;
pub mod channel;
pub mod formation;
pub mod payload;
pub mod stage;
pub mod subscription;

pub use breathing::{BreathPattern, BreathingSnapshot};
pub use channel::{CompiledChannel, DerivedFlags, ProcessingSettings, ProtectionSettings, SchedulingSettings};
pub use formation::{Formation, FormationStatus};
pub use payload::{PayloadEntry, PayloadHistory, PayloadSource};
pub use stage::Stage;
pub use subscription::Subscription;
