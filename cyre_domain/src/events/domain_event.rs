// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `DomainEvent`
//!
//! Notable state transitions the call engine, compiler, and breathing
//! controller raise. Nothing in `cyre_domain` subscribes to these directly —
//! they are collected by the infrastructure logging/metrics adapters, which
//! turn them into `tracing` spans and `prometheus` counters. Kept here
//! (rather than in `cyre`) because the event shapes are part of the domain
//! vocabulary, not an infrastructure decision.

use crate::entities::BreathPattern;
use crate::value_objects::{CallId, ChannelId, FormationId};

/// A notable domain-level occurrence, timestamped by the caller raising it.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    ChannelRegistered { channel_id: ChannelId },
    ChannelBlocked { channel_id: ChannelId, reason: String },
    CallThrottled { channel_id: ChannelId, call_id: CallId, remaining_ms: u64 },
    CallDebounced { channel_id: ChannelId, call_id: CallId, delay_ms: u64 },
    CallRejected { channel_id: ChannelId, call_id: CallId, reason: String },
    HandlerInvoked { channel_id: ChannelId, call_id: CallId, success: bool },
    FormationScheduled { formation_id: FormationId, channel_id: ChannelId },
    FormationCompleted { formation_id: FormationId, channel_id: ChannelId },
    BreathingPatternChanged { from: BreathPattern, to: BreathPattern },
}

impl DomainEvent {
    /// Short, stable name for metrics labels and log targets.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainEvent::ChannelRegistered { .. } => "channel_registered",
            DomainEvent::ChannelBlocked { .. } => "channel_blocked",
            DomainEvent::CallThrottled { .. } => "call_throttled",
            DomainEvent::CallDebounced { .. } => "call_debounced",
            DomainEvent::CallRejected { .. } => "call_rejected",
            DomainEvent::HandlerInvoked { .. } => "handler_invoked",
            DomainEvent::FormationScheduled { .. } => "formation_scheduled",
            DomainEvent::FormationCompleted { .. } => "formation_completed",
            DomainEvent::BreathingPatternChanged { .. } => "breathing_pattern_changed",
        }
    }
}
