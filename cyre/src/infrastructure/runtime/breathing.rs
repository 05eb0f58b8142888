// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Breathing controller
//!
//! Samples system load (call rate and scheduler loop lag, the two signals
//! this process can observe without an external metrics agent) and derives a
//! [`cyre_domain::entities::BreathingSnapshot`]: a stress estimate, a rate
//! multiplier applied to throttle/debounce/interval values, and a coarse
//! pattern (`Normal` / `Stressed` / `Recuperating`). Above the high
//! watermark the runtime recuperates: only `Critical`-priority channels are
//! still allowed to execute, giving the system room to drain its backlog
//! before accepting more work (spec §5.3).

use cyre_domain::entities::{BreathPattern, BreathingSnapshot};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

/// Thresholds and base rate governing how the controller maps stress to a
/// rate multiplier. Loaded from [`crate::infrastructure::config::BreathingConfig`].
#[derive(Debug, Clone, Copy)]
pub struct BreathingThresholds {
    /// Stress below this value is [`BreathPattern::Normal`].
    pub low_watermark: f64,
    /// Stress at or above this value is [`BreathPattern::Recuperating`].
    pub high_watermark: f64,
    /// Rate multiplier at `stress == high_watermark` (interpolated linearly
    /// between `low_watermark` and `high_watermark`).
    pub max_rate_multiplier: f64,
    /// Rolling window, in call-rate samples, used to smooth the stress
    /// estimate.
    pub sample_window: usize,
}

impl Default for BreathingThresholds {
    fn default() -> Self {
        Self { low_watermark: 0.5, high_watermark: 0.9, max_rate_multiplier: 4.0, sample_window: 20 }
    }
}

/// Adaptive load controller. Call [`BreathingController::record_call`] once
/// per `call()` invocation and [`BreathingController::snapshot`] whenever
/// the call engine needs the current stress state.
pub struct BreathingController {
    thresholds: BreathingThresholds,
    recent_call_intervals_ms: Mutex<VecDeque<u64>>,
    last_call_at_ms: AtomicU64,
    target_calls_per_window_ms: u64,
}

impl BreathingController {
    pub fn new(thresholds: BreathingThresholds, target_calls_per_window_ms: u64) -> Self {
        Self {
            thresholds,
            recent_call_intervals_ms: Mutex::new(VecDeque::with_capacity(thresholds.sample_window)),
            last_call_at_ms: AtomicU64::new(0),
            target_calls_per_window_ms,
        }
    }

    /// Records a call's arrival time so subsequent [`snapshot`] calls
    /// reflect the current call rate.
    pub fn record_call(&self) {
        let now = now_ms();
        let prev = self.last_call_at_ms.swap(now, Ordering::AcqRel);
        if prev == 0 {
            return;
        }
        let interval = now.saturating_sub(prev);
        let mut window = self.recent_call_intervals_ms.lock();
        if window.len() == self.thresholds.sample_window {
            window.pop_front();
        }
        window.push_back(interval);
    }

    /// Derives the current [`BreathingSnapshot`] from recorded call
    /// intervals.
    pub fn snapshot(&self) -> BreathingSnapshot {
        let window = self.recent_call_intervals_ms.lock();
        let stress = if window.is_empty() {
            0.0
        } else {
            let avg_interval = window.iter().sum::<u64>() as f64 / window.len() as f64;
            if avg_interval <= 0.0 {
                1.0
            } else {
                let observed_rate = 1000.0 / avg_interval;
                let target_rate = 1000.0 / self.target_calls_per_window_ms.max(1) as f64;
                (observed_rate / target_rate).min(1.0).max(0.0)
            }
        };
        drop(window);

        let pattern = if stress >= self.thresholds.high_watermark {
            BreathPattern::Recuperating
        } else if stress >= self.thresholds.low_watermark {
            BreathPattern::Stressed
        } else {
            BreathPattern::Normal
        };

        let rate_multiplier = match pattern {
            BreathPattern::Normal => 1.0,
            BreathPattern::Stressed | BreathPattern::Recuperating => {
                let span = (self.thresholds.high_watermark - self.thresholds.low_watermark).max(f64::EPSILON);
                let position = ((stress - self.thresholds.low_watermark) / span).clamp(0.0, 1.0);
                1.0 + position * (self.thresholds.max_rate_multiplier - 1.0)
            }
        };

        BreathingSnapshot { stress, rate_multiplier, pattern, timestamp_ms: now_ms() }
    }

    /// Logs a `tracing` event if `previous` and `current` differ in
    /// pattern, matching [`cyre_domain::events::DomainEvent::BreathingPatternChanged`].
    pub fn log_transition(previous: BreathPattern, current: BreathingSnapshot) {
        if previous != current.pattern {
            info!(from = ?previous, to = ?current.pattern, stress = current.stress, "breathing pattern changed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_samples_means_normal() {
        let controller = BreathingController::new(BreathingThresholds::default(), 10);
        let snap = controller.snapshot();
        assert_eq!(snap.pattern, BreathPattern::Normal);
        assert_eq!(snap.rate_multiplier, 1.0);
    }

    #[test]
    fn rapid_calls_raise_stress() {
        let controller = BreathingController::new(BreathingThresholds::default(), 1000);
        for _ in 0..25 {
            controller.record_call();
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        let snap = controller.snapshot();
        assert!(snap.stress > 0.0);
    }
}
