// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Infrastructure configuration
//!
//! The infrastructure-facing subset of `cyre_bootstrap`'s `RuntimeConfig`:
//! just the settings the breathing controller, TimeKeeper, and payload
//! history adapter need to construct themselves. Kept separate from the
//! bootstrap crate's config so `cyre` never depends on `clap`/CLI parsing —
//! an embedding application can build these directly without going through
//! a CLI at all.

use crate::infrastructure::adapters::HistoryConfig;
use crate::infrastructure::runtime::BreathingThresholds;
use serde::{Deserialize, Serialize};

/// Settings for [`crate::infrastructure::runtime::BreathingController`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathingConfig {
    pub low_watermark: f64,
    pub high_watermark: f64,
    pub max_rate_multiplier: f64,
    pub sample_window: usize,
    /// Target milliseconds between calls at zero stress, used to normalize
    /// the observed call rate.
    pub target_interval_ms: u64,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        let thresholds = BreathingThresholds::default();
        Self {
            low_watermark: thresholds.low_watermark,
            high_watermark: thresholds.high_watermark,
            max_rate_multiplier: thresholds.max_rate_multiplier,
            sample_window: thresholds.sample_window,
            target_interval_ms: 50,
        }
    }
}

impl From<BreathingConfig> for BreathingThresholds {
    fn from(config: BreathingConfig) -> Self {
        Self {
            low_watermark: config.low_watermark,
            high_watermark: config.high_watermark,
            max_rate_multiplier: config.max_rate_multiplier,
            sample_window: config.sample_window,
        }
    }
}

/// Settings for [`crate::infrastructure::runtime::TimeKeeper`]. Currently
/// empty beyond a marker for future tuning (e.g. a max-formations cap); kept
/// as a distinct type so call sites don't need to change when settings are
/// added.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeKeeperConfig {}

pub use HistoryConfig as PayloadHistoryConfig;
