// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `CompiledChannel`
//!
//! The output of [`crate::services::compiler`]: a channel's raw config,
//! compiled once into a fixed pipeline and a set of derived flags the call
//! engine branches on without re-inspecting config at call time.

use crate::entities::stage::Stage;
use crate::value_objects::{ChannelId, ChannelPath, Priority, Repeat};

/// Throttle/debounce/recuperation-bypass settings (spec §4.3).
#[derive(Debug, Clone, Default)]
pub struct ProtectionSettings {
    /// Minimum milliseconds between successive executions. `None` disables
    /// throttling.
    pub throttle_ms: Option<u64>,
    /// Milliseconds to wait for calls to settle before executing with the
    /// latest payload. `None` disables debouncing.
    pub debounce_ms: Option<u64>,
    /// Upper bound on how long a debounce can keep deferring execution,
    /// regardless of continued calls. `None` means no cap.
    pub max_wait_ms: Option<u64>,
}

impl ProtectionSettings {
    pub fn has_any(&self) -> bool {
        self.throttle_ms.is_some() || self.debounce_ms.is_some()
    }
}

/// TimeKeeper scheduling settings (spec §4.2, §5.2).
#[derive(Debug, Clone, Default)]
pub struct SchedulingSettings {
    /// Fixed interval between repeated executions, in milliseconds.
    pub interval_ms: Option<u64>,
    /// Delay before the first execution, in milliseconds.
    pub delay_ms: Option<u64>,
    /// How many times to execute; defaults to [`Repeat::Once`].
    pub repeat: Repeat,
}

impl SchedulingSettings {
    pub fn has_any(&self) -> bool {
        self.interval_ms.is_some() || self.delay_ms.is_some()
    }
}

/// Processing-related settings that aren't themselves pipeline stages but
/// influence how the call engine treats the channel.
#[derive(Debug, Clone, Default)]
pub struct ProcessingSettings {
    pub priority: Priority,
}

/// Flags derived once at compile time so the call engine never has to
/// re-inspect raw config on the hot path (spec §4.4).
#[derive(Debug, Clone, Default)]
pub struct DerivedFlags {
    /// Channel was registered with `block: true`, or failed a cross-rule
    /// that the compiler marks blocked rather than reject outright
    /// (spec §4.4's "errors promote to `isBlocked=true`").
    pub is_blocked: bool,
    /// Set alongside `is_blocked` when a cross-rule (not an explicit
    /// `block: true`) is what caused it; the call engine surfaces this as
    /// the rejection message.
    pub block_reason: Option<String>,
    /// No protections, no pipeline stages, and no scheduling: `call()` can
    /// go straight to the handler (spec §4.5 step 3).
    pub has_fast_path: bool,
    /// At least one of throttle/debounce is configured.
    pub has_protections: bool,
    /// At least one pipeline stage is configured.
    pub has_processing: bool,
    /// At least one of interval/delay is configured.
    pub has_scheduling: bool,
}

/// A fully compiled, immutable channel definition. Produced once by
/// [`crate::services::compiler::compile`] and stored in a
/// [`crate::repositories::channel_store::ChannelStore`]; never mutated
/// in place — re-registration recompiles and replaces it.
#[derive(Debug, Clone)]
pub struct CompiledChannel {
    pub id: ChannelId,
    pub path: Option<ChannelPath>,
    pub protection: ProtectionSettings,
    pub scheduling: SchedulingSettings,
    pub processing: ProcessingSettings,
    pub pipeline: Vec<Stage>,
    pub flags: DerivedFlags,
}

impl CompiledChannel {
    /// Computes [`DerivedFlags`] from the other compiled fields. Called once
    /// by the compiler after assembly; exposed so tests can assert the
    /// derivation rule directly. `block_reason` being `Some` always implies
    /// `is_blocked`; an explicit `block: true` with no cross-rule failure
    /// leaves `block_reason` `None`.
    pub fn derive_flags(
        protection: &ProtectionSettings,
        scheduling: &SchedulingSettings,
        pipeline: &[Stage],
        explicitly_blocked: bool,
        block_reason: Option<String>,
    ) -> DerivedFlags {
        let has_protections = protection.has_any();
        let has_processing = !pipeline.is_empty();
        let has_scheduling = scheduling.has_any();
        let is_blocked = explicitly_blocked || block_reason.is_some();
        DerivedFlags {
            is_blocked,
            block_reason,
            has_fast_path: !has_protections && !has_processing && !has_scheduling,
            has_protections,
            has_processing,
            has_scheduling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_path_when_nothing_configured() {
        let flags = CompiledChannel::derive_flags(
            &ProtectionSettings::default(),
            &SchedulingSettings::default(),
            &[],
            false,
            None,
        );
        assert!(flags.has_fast_path);
        assert!(!flags.has_protections);
        assert!(!flags.has_processing);
        assert!(!flags.has_scheduling);
    }

    #[test]
    fn no_fast_path_once_throttled() {
        let protection = ProtectionSettings { throttle_ms: Some(100), ..Default::default() };
        let flags = CompiledChannel::derive_flags(&protection, &SchedulingSettings::default(), &[], false, None);
        assert!(!flags.has_fast_path);
        assert!(flags.has_protections);
    }

    #[test]
    fn blocked_flag_is_independent_of_fast_path() {
        let flags = CompiledChannel::derive_flags(
            &ProtectionSettings::default(),
            &SchedulingSettings::default(),
            &[],
            true,
            None,
        );
        assert!(flags.is_blocked);
        assert!(flags.has_fast_path);
    }

    #[test]
    fn block_reason_implies_blocked_even_without_explicit_flag() {
        let flags = CompiledChannel::derive_flags(
            &ProtectionSettings::default(),
            &SchedulingSettings::default(),
            &[],
            false,
            Some("interval requires repeat to be set".into()),
        );
        assert!(flags.is_blocked);
        assert_eq!(flags.block_reason.as_deref(), Some("interval requires repeat to be set"));
    }
}
