// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `CallEngine`
//!
//! Orchestrates a single `call()` through the fixed pipeline spec §4.5
//! defines: lookup the channel, short-circuit if blocked, take the fast
//! path if nothing is configured, otherwise run the bouncer
//! (recuperation → throttle → debounce), the compiled processing pipeline,
//! scheduling, the handler, and finally post-processing (payload recording,
//! metrics, the response envelope).
//!
//! This is the one place in the crate that threads a payload through every
//! other port (`ChannelStore`, `SubscriptionRegistry`, `PayloadStore`,
//! `TimeKeeper`, `BreathingController`) — every other service is a narrow
//! specialist the engine calls into. `CallEngine` itself is a thin `Arc`
//! handle (`#[derive(Clone)]`) so a debounce formation can hold its own
//! clone and re-enter `execute` without duplicating any of this state.

use crate::infrastructure::metrics::MetricsService;
use crate::infrastructure::runtime::{BreathingController, TimeKeeper};
use cyre_domain::entities::{CompiledChannel, PayloadEntry, PayloadSource, Stage};
use cyre_domain::error::CyreError;
use cyre_domain::repositories::{ChannelStore, PayloadStore, SubscriptionRegistry};
use cyre_domain::services::change_detector;
use cyre_domain::value_objects::{CallId, ChannelId, CyreResponse, Repeat, ResponseMetadata};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{instrument, warn};

fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

#[derive(Default)]
struct BouncerState {
    last_exec_at_ms: Option<u64>,
    pending_debounce: Option<cyre_domain::value_objects::FormationId>,
}

/// Outcome of running a payload through a channel's compiled pipeline.
enum PipelineOutcome {
    /// Continue to scheduling/handler with this (possibly transformed)
    /// payload.
    Continue(Value),
    /// A stage rejected the payload outright.
    Rejected(CyreError),
    /// `DetectChanges` found the payload unchanged; skip the handler but
    /// still report success.
    Unchanged,
}

struct Inner {
    channels: Arc<dyn ChannelStore>,
    subscriptions: Arc<dyn SubscriptionRegistry>,
    payloads: Arc<dyn PayloadStore>,
    time_keeper: Arc<TimeKeeper>,
    breathing: Arc<BreathingController>,
    metrics: Arc<MetricsService>,
    bouncer_state: RwLock<HashMap<ChannelId, BouncerState>>,
}

/// The call engine: the application service behind `Runtime::call`. Cheap
/// to clone — an `Arc` handle around shared state — so a debounce formation
/// can carry its own handle and re-run `execute` when it fires.
#[derive(Clone)]
pub struct CallEngine(Arc<Inner>);

impl CallEngine {
    pub fn new(
        channels: Arc<dyn ChannelStore>,
        subscriptions: Arc<dyn SubscriptionRegistry>,
        payloads: Arc<dyn PayloadStore>,
        time_keeper: Arc<TimeKeeper>,
        breathing: Arc<BreathingController>,
        metrics: Arc<MetricsService>,
    ) -> Self {
        Self(Arc::new(Inner {
            channels,
            subscriptions,
            payloads,
            time_keeper,
            breathing,
            metrics,
            bouncer_state: RwLock::new(HashMap::new()),
        }))
    }

    /// Executes a single `call()`.
    #[instrument(skip(self, payload), fields(channel = %channel_id))]
    pub async fn call(&self, channel_id: &ChannelId, payload: Value) -> CyreResponse {
        self.0.breathing.record_call();
        self.0.metrics.record_call();
        self.execute(channel_id.clone(), payload, false).await
    }

    async fn execute(&self, channel_id: ChannelId, payload: Value, bypass_debounce: bool) -> CyreResponse {
        let call_id = CallId::new();
        let metadata = ResponseMetadata { call_id: Some(call_id.to_string()), channel_id: Some(channel_id.to_string()), ..Default::default() };

        let Some(channel) = self.0.channels.get(&channel_id) else {
            self.0.metrics.record_rejection("channel_not_found");
            return self.rejected("channel not registered", CyreError::ChannelNotFound(channel_id.to_string()), metadata);
        };

        if channel.flags.is_blocked {
            self.0.metrics.record_rejection("blocked");
            let reason = channel.flags.block_reason.clone().unwrap_or_else(|| "channel is blocked".to_string());
            return self.rejected(&reason, CyreError::ChannelBlocked(reason.clone()), metadata);
        }

        if channel.flags.has_fast_path {
            return self.invoke_handler(&channel_id, payload, metadata).await;
        }

        if let Some(response) = self.run_bouncer(&channel, &payload, bypass_debounce, metadata.clone()).await {
            return response;
        }

        match self.run_pipeline(&channel, payload.clone()) {
            PipelineOutcome::Rejected(err) => {
                self.0.metrics.record_rejection("pipeline");
                self.rejected("pipeline rejected payload", err, metadata)
            }
            PipelineOutcome::Unchanged => {
                let mut metadata = metadata;
                metadata.no_change = true;
                CyreResponse::success(payload, "payload unchanged, handler skipped", now_ms(), metadata)
            }
            PipelineOutcome::Continue(processed) => {
                self.0.payloads.record(&channel_id, PayloadEntry { value: payload, source: PayloadSource::Call, recorded_at_ms: now_ms() });

                if channel.flags.has_scheduling {
                    self.schedule(&channel, processed, metadata.clone());
                    CyreResponse::success(Value::Null, "call scheduled", now_ms(), metadata)
                } else {
                    self.invoke_handler(&channel_id, processed, metadata).await
                }
            }
        }
    }

    /// Runs the recuperation/throttle/debounce checks. Returns `Some` with
    /// the rejection (or debounce-accepted) response if the call should not
    /// proceed to the pipeline this invocation.
    async fn run_bouncer(
        &self,
        channel: &CompiledChannel,
        payload: &Value,
        bypass_debounce: bool,
        metadata: ResponseMetadata,
    ) -> Option<CyreResponse> {
        let snapshot = self.0.breathing.snapshot();
        if snapshot.is_recuperating() && !channel.processing.priority.bypasses_recuperation() {
            self.0.metrics.record_rejection("recuperating");
            return Some(self.rejected("system recuperating", CyreError::Recuperating, metadata));
        }

        if let Some(throttle_ms) = channel.protection.throttle_ms {
            let effective_ms = (throttle_ms as f64 * snapshot.rate_multiplier) as u64;
            let mut state = self.0.bouncer_state.write();
            let entry = state.entry(channel.id.clone()).or_default();
            if let Some(last) = entry.last_exec_at_ms {
                let elapsed = now_ms().saturating_sub(last);
                if elapsed < effective_ms {
                    drop(state);
                    self.0.metrics.record_rejection("throttled");
                    let mut md = metadata.clone();
                    md.remaining_ms = Some(effective_ms - elapsed);
                    return Some(self.rejected(
                        "throttled",
                        CyreError::Throttled { remaining_ms: effective_ms - elapsed },
                        md,
                    ));
                }
            }
        }

        if !bypass_debounce {
            if let Some(debounce_ms) = channel.protection.debounce_ms {
                let effective_ms = (debounce_ms as f64 * snapshot.rate_multiplier) as u64;
                self.0.payloads.record(
                    &channel.id,
                    PayloadEntry { value: payload.clone(), source: PayloadSource::Call, recorded_at_ms: now_ms() },
                );

                let mut state = self.0.bouncer_state.write();
                let entry = state.entry(channel.id.clone()).or_default();
                if let Some(previous) = entry.pending_debounce.take() {
                    self.0.time_keeper.forget(&previous);
                }
                drop(state);

                // Re-entrant call: when the formation fires, re-run the
                // whole bouncer with `bypass_debounce = true` so a fresh
                // throttle/recuperation check still applies (spec §9).
                let engine = self.clone();
                let callback: crate::infrastructure::runtime::FormationCallback = Arc::new(move |channel_id| {
                    let engine = engine.clone();
                    Box::pin(async move {
                        let Some(latest) = engine.0.payloads.latest(&channel_id) else { return };
                        let _ = engine.execute(channel_id, latest, true).await;
                    })
                });

                let formation_id = self.0.time_keeper.keep(channel.id.clone(), debounce_ms, None, Repeat::Once, callback);
                self.0.bouncer_state.write().entry(channel.id.clone()).or_default().pending_debounce = Some(formation_id);

                let mut md = metadata.clone();
                md.delay_ms = Some(effective_ms);
                return Some(CyreResponse::success(
                    Value::Null,
                    "call accepted, execution debounced",
                    now_ms(),
                    md,
                ));
            }
        }

        self.0.bouncer_state.write().entry(channel.id.clone()).or_default().last_exec_at_ms = Some(now_ms());
        None
    }

    fn run_pipeline(&self, channel: &CompiledChannel, payload: Value) -> PipelineOutcome {
        let original = payload.clone();
        let mut current = payload;

        for stage in &channel.pipeline {
            match stage {
                Stage::Required => {
                    if original.is_null() {
                        return PipelineOutcome::Rejected(CyreError::PipelineRejected("required".into()));
                    }
                }
                Stage::Schema(validate) => {
                    if let Err(reason) = validate(&current) {
                        return PipelineOutcome::Rejected(CyreError::PipelineRejected(reason));
                    }
                }
                Stage::Condition(predicate) => {
                    if !predicate(&current) {
                        return PipelineOutcome::Rejected(CyreError::PipelineRejected("condition".into()));
                    }
                }
                Stage::Selector(select) => current = select(&current),
                Stage::Transform(transform) => current = transform(current),
                Stage::DetectChanges => {
                    // Resolved open question: compare against the
                    // pre-transform payload, not `current`.
                    if change_detector::is_unchanged(self.0.payloads.latest(&channel.id).as_ref(), &original) {
                        return PipelineOutcome::Unchanged;
                    }
                }
            }
        }
        PipelineOutcome::Continue(current)
    }

    fn schedule(&self, channel: &CompiledChannel, payload: Value, metadata: ResponseMetadata) {
        let delay_ms = channel.scheduling.delay_ms.unwrap_or(0);
        let interval_ms = channel.scheduling.interval_ms;
        let repeat = channel.scheduling.repeat;
        let channel_id = channel.id.clone();

        let subscriptions = self.0.subscriptions.clone();
        let payloads = self.0.payloads.clone();
        let metrics = self.0.metrics.clone();

        let callback: crate::infrastructure::runtime::FormationCallback = Arc::new(move |channel_id| {
            let subscriptions = subscriptions.clone();
            let payloads = payloads.clone();
            let metrics = metrics.clone();
            let payload = payload.clone();
            Box::pin(async move {
                let Some(handler) = subscriptions.get(&channel_id) else {
                    warn!(channel = %channel_id, "scheduled call fired with no subscriber");
                    metrics.record_rejection("no_subscriber");
                    return;
                };
                payloads.record(&channel_id, PayloadEntry { value: payload.clone(), source: PayloadSource::Scheduled, recorded_at_ms: now_ms() });
                let _ = handler.handle(payload).await;
            })
        });

        let _ = metadata;
        self.0.time_keeper.keep(channel_id, delay_ms, interval_ms, repeat, callback);
    }

    async fn invoke_handler(&self, channel_id: &ChannelId, payload: Value, metadata: ResponseMetadata) -> CyreResponse {
        let Some(handler) = self.0.subscriptions.get(channel_id) else {
            self.0.metrics.record_rejection("no_subscriber");
            return self.rejected("no subscriber registered", CyreError::NoSubscriber(channel_id.to_string()), metadata);
        };

        self.0.payloads.record(channel_id, PayloadEntry { value: payload.clone(), source: PayloadSource::Call, recorded_at_ms: now_ms() });

        let join_result = tokio::spawn(async move { handler.handle(payload).await }).await;

        match join_result {
            Ok(Ok(result)) => CyreResponse::success(result, "ok", now_ms(), metadata),
            Ok(Err(err)) => {
                self.0.metrics.record_rejection("handler_error");
                self.rejected("handler returned an error", err, metadata)
            }
            Err(join_err) => {
                self.0.metrics.record_rejection("handler_panicked");
                self.rejected("handler panicked", CyreError::HandlerPanicked(join_err.to_string()), metadata)
            }
        }
    }

    fn rejected(&self, message: &str, error: CyreError, metadata: ResponseMetadata) -> CyreResponse {
        CyreResponse::rejected(message, error.to_string(), now_ms(), metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{InMemoryChannelStore, InMemoryPayloadStore, InMemorySubscriptionRegistry};
    use crate::infrastructure::runtime::BreathingThresholds;
    use cyre_domain::services::{compile, ChannelConfig};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn engine() -> (CallEngine, Arc<dyn ChannelStore>, Arc<dyn SubscriptionRegistry>) {
        let channels: Arc<dyn ChannelStore> = Arc::new(InMemoryChannelStore::default());
        let subscriptions: Arc<dyn SubscriptionRegistry> = Arc::new(InMemorySubscriptionRegistry::default());
        let payloads: Arc<dyn PayloadStore> = Arc::new(InMemoryPayloadStore::default());
        let time_keeper = Arc::new(TimeKeeper::new());
        let breathing = Arc::new(BreathingController::new(BreathingThresholds::default(), 50));
        let metrics = Arc::new(MetricsService::new());
        let engine = CallEngine::new(channels.clone(), subscriptions.clone(), payloads, time_keeper, breathing, metrics);
        (engine, channels, subscriptions)
    }

    #[tokio::test]
    async fn fast_path_calls_handler_directly() {
        let (engine, channels, subscriptions) = engine();
        let id = ChannelId::new("greet").unwrap();
        let config = ChannelConfig { id: id.to_string(), ..Default::default() };
        let (compiled, _warnings) = compile(config).unwrap();
        channels.upsert(compiled).unwrap();
        subscriptions
            .subscribe(id.clone(), Arc::new(|payload: Value| async move { Ok(payload) }))
            .unwrap();

        let response = engine.call(&id, json!({"name": "world"})).await;
        assert!(response.ok);
        assert_eq!(response.payload, json!({"name": "world"}));
    }

    #[tokio::test]
    async fn missing_channel_is_rejected() {
        let (engine, _channels, _subscriptions) = engine();
        let id = ChannelId::new("missing").unwrap();
        let response = engine.call(&id, Value::Null).await;
        assert!(!response.ok);
    }

    #[tokio::test]
    async fn throttle_rejects_rapid_second_call() {
        let (engine, channels, subscriptions) = engine();
        let id = ChannelId::new("throttled").unwrap();
        let config = ChannelConfig { id: id.to_string(), throttle_ms: Some(10_000), ..Default::default() };
        let (compiled, _warnings) = compile(config).unwrap();
        channels.upsert(compiled).unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        subscriptions
            .subscribe(
                id.clone(),
                Arc::new(move |payload: Value| {
                    let count = count_clone.clone();
                    async move {
                        count.fetch_add(1, Ordering::SeqCst);
                        Ok(payload)
                    }
                }),
            )
            .unwrap();

        let first = engine.call(&id, json!(1)).await;
        assert!(first.ok);
        let second = engine.call(&id, json!(2)).await;
        assert!(!second.ok);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blocked_channel_surfaces_its_block_reason() {
        let (engine, channels, _subscriptions) = engine();
        let id = ChannelId::new("x").unwrap();
        let config = ChannelConfig { id: id.to_string(), interval_ms: Some(100), ..Default::default() };
        let (compiled, _warnings) = compile(config).unwrap();
        assert!(compiled.flags.is_blocked);
        channels.upsert(compiled).unwrap();

        let response = engine.call(&id, json!(1)).await;
        assert!(!response.ok);
        assert_eq!(response.message, "interval requires repeat to be set");
    }

    #[tokio::test]
    async fn detect_changes_sets_no_change_metadata() {
        let (engine, channels, subscriptions) = engine();
        let id = ChannelId::new("detector").unwrap();
        let config = ChannelConfig { id: id.to_string(), detect_changes: true, ..Default::default() };
        let (compiled, _warnings) = compile(config).unwrap();
        channels.upsert(compiled).unwrap();
        subscriptions.subscribe(id.clone(), Arc::new(|payload: Value| async move { Ok(payload) })).unwrap();

        let first = engine.call(&id, json!(1)).await;
        assert!(first.ok);
        assert!(!first.metadata.no_change);

        let second = engine.call(&id, json!(1)).await;
        assert!(second.ok);
        assert!(second.metadata.no_change);
    }
}
