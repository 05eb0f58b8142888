// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Metrics service
//!
//! In-process `prometheus` counters and gauges for call outcomes, active
//! formations, and the current breathing rate. No network listener is
//! opened here — exposing these over HTTP is the embedding application's
//! concern; [`MetricsService::snapshot`] gives it everything needed to do
//! so without this crate depending on a particular exporter.

use prometheus::{Gauge, IntCounter, IntCounterVec, IntGauge, Opts, Registry};

/// A point-in-time read of the runtime's counters, for callers that want a
/// plain struct rather than walking the `prometheus::Registry` themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub calls_total: i64,
    pub rejections_total: i64,
    pub active_formations: i64,
    pub breathing_rate_multiplier: f64,
}

/// Owns this runtime's `prometheus` registry and the handles into it.
pub struct MetricsService {
    registry: Registry,
    calls_total: IntCounter,
    rejections_total: IntCounter,
    rejections_by_reason: IntCounterVec,
    active_formations: IntGauge,
    breathing_rate_multiplier: Gauge,
}

impl MetricsService {
    pub fn new() -> Self {
        let registry = Registry::new();

        let calls_total = IntCounter::new("cyre_calls_total", "Total number of call() invocations").unwrap();
        let rejections_total = IntCounter::new("cyre_rejections_total", "Total call rejections").unwrap();
        let rejections_by_reason = IntCounterVec::new(
            Opts::new("cyre_rejections_by_reason_total", "Call rejections broken down by reason"),
            &["reason"],
        )
        .unwrap();
        let active_formations =
            IntGauge::new("cyre_active_formations", "Number of currently active TimeKeeper formations").unwrap();
        let breathing_rate_multiplier = Gauge::new(
            "cyre_breathing_rate_multiplier",
            "Current breathing controller rate multiplier",
        )
        .unwrap();

        registry.register(Box::new(calls_total.clone())).ok();
        registry.register(Box::new(rejections_total.clone())).ok();
        registry.register(Box::new(rejections_by_reason.clone())).ok();
        registry.register(Box::new(active_formations.clone())).ok();
        registry.register(Box::new(breathing_rate_multiplier.clone())).ok();

        Self { registry, calls_total, rejections_total, rejections_by_reason, active_formations, breathing_rate_multiplier }
    }

    pub fn record_call(&self) {
        self.calls_total.inc();
    }

    pub fn record_rejection(&self, reason: &str) {
        self.rejections_total.inc();
        self.rejections_by_reason.with_label_values(&[reason]).inc();
    }

    pub fn set_active_formations(&self, count: i64) {
        self.active_formations.set(count);
    }

    pub fn set_breathing_rate_multiplier(&self, rate: f64) {
        self.breathing_rate_multiplier.set(rate);
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            calls_total: self.calls_total.get() as i64,
            rejections_total: self.rejections_total.get() as i64,
            active_formations: self.active_formations.get(),
            breathing_rate_multiplier: self.breathing_rate_multiplier.get(),
        }
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let service = MetricsService::new();
        assert_eq!(service.snapshot().calls_total, 0);
    }

    #[test]
    fn record_call_increments_counter() {
        let service = MetricsService::new();
        service.record_call();
        service.record_call();
        assert_eq!(service.snapshot().calls_total, 2);
    }
}
