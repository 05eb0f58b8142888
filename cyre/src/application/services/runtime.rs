// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `Runtime`
//!
//! The public entry point: assembles the in-memory adapters, the
//! `TimeKeeper`, the `BreathingController`, metrics, and the `CallEngine`
//! into one handle with the `action`/`on`/`call`/`forget`/`pause`/`resume`/
//! `get` surface an embedding application calls (spec §3). A `Runtime` is
//! cheap to clone (every field is an `Arc`) and safe to share across tasks.

use super::call_engine::CallEngine;
use crate::infrastructure::adapters::{HistoryConfig, InMemoryChannelStore, InMemoryPayloadStore, InMemorySubscriptionRegistry};
use crate::infrastructure::config::BreathingConfig;
use crate::infrastructure::metrics::{MetricsService, MetricsSnapshot};
use crate::infrastructure::runtime::{BreathingController, TimeKeeper};
use cyre_domain::entities::{BreathingSnapshot, Formation, FormationStatus};
use cyre_domain::error::CyreError;
use cyre_domain::repositories::{ChannelStore, Handler, PayloadStore, SubscriptionRegistry};
use cyre_domain::entities::CompiledChannel;
use cyre_domain::services::{compile, ChannelConfig};
use cyre_domain::value_objects::{ActionOutcome, ChannelId, CyreResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Assembled configuration for a fresh [`Runtime`]. Each field mirrors a
/// TOML table an embedding application's `cyre_bootstrap`-style config file
/// would carry (breathing thresholds, per-channel history depth).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub breathing: BreathingConfig,
    pub history: HistoryConfig,
}

/// The assembled Cyre runtime: channels, subscriptions, payload history, the
/// scheduler, the breathing controller, metrics, and the call engine bound
/// together behind one handle.
#[derive(Clone)]
pub struct Runtime {
    channels: Arc<InMemoryChannelStore>,
    subscriptions: Arc<dyn SubscriptionRegistry>,
    payloads: Arc<dyn PayloadStore>,
    time_keeper: Arc<TimeKeeper>,
    breathing: Arc<BreathingController>,
    metrics: Arc<MetricsService>,
    engine: CallEngine,
}

impl Runtime {
    pub fn new(config: RuntimeConfig) -> Self {
        let channels = Arc::new(InMemoryChannelStore::new());
        let subscriptions: Arc<dyn SubscriptionRegistry> = Arc::new(InMemorySubscriptionRegistry::new());
        let payloads: Arc<dyn PayloadStore> = Arc::new(InMemoryPayloadStore::new(config.history));
        let time_keeper = Arc::new(TimeKeeper::new());
        let breathing = Arc::new(BreathingController::new(config.breathing.into(), config.breathing.target_interval_ms));
        let metrics = Arc::new(MetricsService::new());

        let engine = CallEngine::new(
            channels.clone() as Arc<dyn ChannelStore>,
            subscriptions.clone(),
            payloads.clone(),
            time_keeper.clone(),
            breathing.clone(),
            metrics.clone(),
        );

        Self { channels, subscriptions, payloads, time_keeper, breathing, metrics, engine }
    }

    /// Registers (or re-registers) a channel. Re-registration recompiles and
    /// replaces the channel in place; any formations already scheduled under
    /// the old definition keep running against the superseded config until
    /// they next fire, at which point they read the new one.
    ///
    /// `Err` is reserved for a malformed `id`/`path` — there is then no
    /// valid identity to store a record under. A config that fails a spec
    /// §4.4 cross-rule still registers successfully: the record is stored
    /// blocked, and `Ok(outcome)` reports that via `outcome.blocked`/
    /// `outcome.block_reason` so the caller can decide whether to treat it
    /// as fatal.
    pub fn action(&self, config: ChannelConfig) -> Result<ActionOutcome, CyreError> {
        let (compiled, warnings) = compile(config)?;
        let id = compiled.id.clone();
        let blocked = compiled.flags.is_blocked;
        let block_reason = compiled.flags.block_reason.clone();
        self.channels.upsert(compiled)?;
        Ok(ActionOutcome { id, blocked, block_reason, warnings })
    }

    /// Subscribes `handler` as the channel's sole callback, replacing any
    /// previous subscriber.
    pub fn on<H>(&self, channel_id: &ChannelId, handler: H) -> Result<(), CyreError>
    where
        H: Handler + 'static,
    {
        self.subscriptions.subscribe(channel_id.clone(), Arc::new(handler))
    }

    /// Executes `call()` against `channel_id` with `payload`.
    pub async fn call(&self, channel_id: &ChannelId, payload: Value) -> CyreResponse {
        self.engine.call(channel_id, payload).await
    }

    /// Removes a channel entirely: its compiled definition, its subscriber,
    /// its payload history, and every formation still scheduled against it.
    pub fn forget(&self, channel_id: &ChannelId) -> bool {
        let existed = self.channels.remove(channel_id).is_some();
        self.subscriptions.unsubscribe(channel_id);
        self.payloads.clear(channel_id);
        for formation in self.formations_for(channel_id) {
            self.time_keeper.forget(&formation.id);
        }
        existed
    }

    /// Pauses every formation currently scheduled against `channel_id`.
    pub fn pause(&self, channel_id: &ChannelId) {
        for formation in self.formations_for(channel_id) {
            self.time_keeper.pause(&formation.id);
        }
    }

    /// Resumes every paused formation scheduled against `channel_id`.
    pub fn resume(&self, channel_id: &ChannelId) {
        for formation in self.formations_for(channel_id) {
            self.time_keeper.resume(&formation.id);
        }
    }

    /// The compiled channel registered under `channel_id`, if any (spec §6:
    /// `get(id) -> compiledChannel | undefined`). This is the only way to
    /// observe a channel's `flags` — including whether it's blocked — from
    /// the public surface.
    pub fn get(&self, channel_id: &ChannelId) -> Option<CompiledChannel> {
        self.channels.get(channel_id)
    }

    /// The most recently recorded payload for `channel_id`, if any (the
    /// separate `PayloadStore::get` of spec §4.7 — distinct from
    /// [`Runtime::get`], which returns the compiled channel).
    pub fn latest_payload(&self, channel_id: &ChannelId) -> Option<Value> {
        self.payloads.latest(channel_id)
    }

    /// Channel ids registered under a hierarchical path matching `pattern`
    /// (`*`/`**` wildcards; spec §4.1).
    pub fn match_path(&self, pattern: &str) -> Vec<ChannelId> {
        self.channels.match_path(pattern)
    }

    pub fn breathing_snapshot(&self) -> BreathingSnapshot {
        self.breathing.snapshot()
    }

    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.set_active_formations(self.time_keeper.get_active().len() as i64);
        self.metrics.set_breathing_rate_multiplier(self.breathing.snapshot().rate_multiplier);
        self.metrics.snapshot()
    }

    fn formations_for(&self, channel_id: &ChannelId) -> Vec<Formation> {
        self.time_keeper
            .get_all()
            .into_iter()
            .filter(|f| &f.channel_id == channel_id && f.status != FormationStatus::Cancelled)
            .collect()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}
