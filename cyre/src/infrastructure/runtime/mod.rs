// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Runtime governance: the [`TimeKeeper`] scheduler and the
//! [`BreathingController`] adaptive load governor.

pub mod breathing;
pub mod time_keeper;

pub use breathing::{BreathingController, BreathingThresholds};
pub use time_keeper::{FormationCallback, TimeKeeper};
