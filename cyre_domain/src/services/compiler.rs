// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Channel compiler
//!
//! Turns a raw [`ChannelConfig`] into a [`CompiledChannel`]: validates every
//! field, applies the cross-field rules spec §4.4's table requires, and
//! assembles the fixed pipeline in its canonical order
//! (`required → schema → condition → selector → transform → detectChanges`).
//! Compilation happens exactly once per registration; nothing here performs
//! I/O or touches a clock.
//!
//! Cross-rule failures (mutual exclusion of `throttle`/`debounce`, `maxWait`
//! misconfiguration, `interval` without `repeat`, `repeat: 0`, a
//! zero-duration protection) never abort compilation outright: they set
//! [`crate::entities::DerivedFlags::is_blocked`] and `block_reason` on an
//! otherwise-complete record, which the caller still stores (spec §4.4's
//! failure semantics — "a compile that sets `isBlocked` still stores the
//! record"). Only a malformed id or path, which leaves nothing to store
//! under, is a hard [`CyreError`]. Softer issues (sub-floor durations,
//! `schema` without `required`, `transform` without `detectChanges`)
//! accumulate as warnings alongside the compiled record instead.

use crate::entities::{
    CompiledChannel, ProcessingSettings, ProtectionSettings, SchedulingSettings, Stage,
};
use crate::error::CyreError;
use crate::value_objects::{ChannelId, ChannelPath, Priority, Repeat};

/// Raw, caller-supplied channel configuration, prior to compilation.
#[derive(Default)]
pub struct ChannelConfig {
    pub id: String,
    pub path: Option<String>,
    pub throttle_ms: Option<u64>,
    pub debounce_ms: Option<u64>,
    pub max_wait_ms: Option<u64>,
    pub interval_ms: Option<u64>,
    pub delay_ms: Option<u64>,
    pub repeat: Option<u64>,
    pub priority: Priority,
    pub block: bool,
    pub required: bool,
    pub schema: Option<crate::entities::stage::SchemaFn>,
    pub condition: Option<crate::entities::stage::ConditionFn>,
    pub selector: Option<crate::entities::stage::SelectorFn>,
    pub transform: Option<crate::entities::stage::TransformFn>,
    pub detect_changes: bool,
}

/// Compiles a raw [`ChannelConfig`] into a [`CompiledChannel`] plus any
/// non-blocking warnings gathered along the way.
///
/// # Errors
///
/// Returns [`CyreError::InvalidConfiguration`] or [`CyreError::InvalidPath`]
/// only when `id`/`path` themselves don't parse — there is then no valid
/// identity to store a record under. Every cross-field rule in spec §4.4's
/// table is enforced here too, but a *failing* one never aborts compilation:
/// it sets `flags.is_blocked`/`flags.block_reason` on an otherwise-complete
/// record, which the caller still stores (spec §4.4's failure semantics).
pub fn compile(config: ChannelConfig) -> Result<(CompiledChannel, Vec<String>), CyreError> {
    let id = ChannelId::new(config.id)?;
    let path = config.path.map(ChannelPath::new).transpose()?;

    let mut block_reason: Option<String> = None;
    let mut warnings = Vec::new();

    let protection = compile_protection(&config, &mut block_reason, &mut warnings);
    let scheduling = compile_scheduling(&config, &mut block_reason, &mut warnings);
    let processing = ProcessingSettings { priority: config.priority };
    let pipeline = compile_pipeline(&config, &mut warnings);

    let flags = CompiledChannel::derive_flags(&protection, &scheduling, &pipeline, config.block, block_reason);

    Ok((CompiledChannel { id, path, protection, scheduling, processing, pipeline, flags }, warnings))
}

/// Validates protection config and reports the first cross-rule failure it
/// finds via `block_reason` (subsequent checks are skipped once one is set,
/// mirroring spec §4.4's "stops further field processing"). Never returns
/// `Err`: a failing rule still yields a `ProtectionSettings` so the caller
/// can build a storable, blocked record.
fn compile_protection(config: &ChannelConfig, block_reason: &mut Option<String>, warnings: &mut Vec<String>) -> ProtectionSettings {
    if block_reason.is_none() && config.throttle_ms == Some(0) {
        *block_reason = Some("throttle must be >= 1ms, or omitted".into());
    }
    if block_reason.is_none() && config.debounce_ms == Some(0) {
        *block_reason = Some("debounce must be >= 1ms, or omitted".into());
    }
    if block_reason.is_none() && config.throttle_ms.is_some() && config.debounce_ms.is_some() {
        *block_reason = Some("throttle and debounce cannot both be set on the same channel".into());
    }
    if block_reason.is_none() && config.max_wait_ms.is_some() && config.debounce_ms.is_none() {
        *block_reason = Some("maxWait requires debounce to be set".into());
    }
    if let (Some(max_wait), Some(debounce)) = (config.max_wait_ms, config.debounce_ms) {
        if block_reason.is_none() && max_wait <= debounce {
            *block_reason = Some("maxWait must be greater than debounce".into());
        }
    }

    if let Some(throttle) = config.throttle_ms {
        if throttle < 16 {
            warnings.push(format!("throttle of {throttle}ms is below the recommended 16ms floor"));
        }
    }
    if let Some(debounce) = config.debounce_ms {
        if debounce < 100 {
            warnings.push(format!("debounce of {debounce}ms is below the recommended 100ms floor"));
        }
    }

    ProtectionSettings {
        throttle_ms: config.throttle_ms,
        debounce_ms: config.debounce_ms,
        max_wait_ms: config.max_wait_ms,
    }
}

fn compile_scheduling(config: &ChannelConfig, block_reason: &mut Option<String>, warnings: &mut Vec<String>) -> SchedulingSettings {
    if block_reason.is_none() && config.interval_ms == Some(0) {
        *block_reason = Some("interval must be >= 1ms, or omitted".into());
    }
    if block_reason.is_none() && config.interval_ms.is_some() && config.repeat.is_none() {
        *block_reason = Some("interval requires repeat to be set".into());
    }
    if block_reason.is_none() && config.repeat == Some(0) {
        *block_reason = Some("repeat: 0 is not valid; omit repeat or use a count >= 1".into());
    }

    if let Some(interval) = config.interval_ms {
        if interval < 1000 {
            warnings.push(format!("interval of {interval}ms is below the recommended 1000ms floor"));
        }
    }

    // `Repeat::from_count` itself rejects `Some(0)`; that rule is already
    // captured above, so fall back to the default rather than propagate a
    // second error for an already-blocked record.
    let repeat = Repeat::from_count(config.repeat).unwrap_or_default();
    SchedulingSettings { interval_ms: config.interval_ms, delay_ms: config.delay_ms, repeat }
}

fn compile_pipeline(config: &ChannelConfig, warnings: &mut Vec<String>) -> Vec<Stage> {
    let mut pipeline = Vec::new();
    if config.required {
        pipeline.push(Stage::Required);
    }
    if let Some(schema) = config.schema.clone() {
        pipeline.push(Stage::Schema(schema));
    }
    if let Some(condition) = config.condition.clone() {
        pipeline.push(Stage::Condition(condition));
    }
    if let Some(selector) = config.selector.clone() {
        pipeline.push(Stage::Selector(selector));
    }
    if let Some(transform) = config.transform.clone() {
        pipeline.push(Stage::Transform(transform));
    }
    if config.detect_changes {
        pipeline.push(Stage::DetectChanges);
    }

    if config.schema.is_some() && !config.required {
        warnings.push("schema is set without required; a missing payload reaches the validator".into());
    }
    if config.transform.is_some() && !config.detect_changes {
        warnings.push("transform is set without detectChanges; identical payloads will still re-invoke the handler".into());
    }

    pipeline
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ChannelConfig {
        ChannelConfig { id: "test".into(), ..Default::default() }
    }

    #[test]
    fn compiles_bare_channel_with_fast_path() {
        let (compiled, warnings) = compile(base()).unwrap();
        assert!(compiled.flags.has_fast_path);
        assert!(!compiled.flags.is_blocked);
        assert!(compiled.pipeline.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn zero_throttle_compiles_to_a_blocked_record() {
        let config = ChannelConfig { throttle_ms: Some(0), ..base() };
        let (compiled, _warnings) = compile(config).unwrap();
        assert!(compiled.flags.is_blocked);
        assert_eq!(compiled.flags.block_reason.as_deref(), Some("throttle must be >= 1ms, or omitted"));
    }

    #[test]
    fn zero_repeat_compiles_to_a_blocked_record() {
        let config = ChannelConfig { repeat: Some(0), ..base() };
        let (compiled, _warnings) = compile(config).unwrap();
        assert!(compiled.flags.is_blocked);
    }

    #[test]
    fn interval_without_repeat_compiles_to_a_blocked_record() {
        let config = ChannelConfig { interval_ms: Some(100), ..base() };
        let (compiled, _warnings) = compile(config).unwrap();
        assert!(compiled.flags.is_blocked);
        assert_eq!(compiled.flags.block_reason.as_deref(), Some("interval requires repeat to be set"));
    }

    #[test]
    fn accepts_interval_with_repeat() {
        let config = ChannelConfig { interval_ms: Some(1000), repeat: Some(3), ..base() };
        let (compiled, warnings) = compile(config).unwrap();
        assert!(!compiled.flags.is_blocked);
        assert!(warnings.is_empty());
    }

    #[test]
    fn max_wait_without_debounce_compiles_to_a_blocked_record() {
        let config = ChannelConfig { max_wait_ms: Some(100), ..base() };
        let (compiled, _warnings) = compile(config).unwrap();
        assert!(compiled.flags.is_blocked);
        assert_eq!(compiled.flags.block_reason.as_deref(), Some("maxWait requires debounce to be set"));
    }

    #[test]
    fn max_wait_below_debounce_compiles_to_a_blocked_record() {
        let config = ChannelConfig { debounce_ms: Some(200), max_wait_ms: Some(100), ..base() };
        let (compiled, _warnings) = compile(config).unwrap();
        assert!(compiled.flags.is_blocked);
    }

    #[test]
    fn max_wait_equal_to_debounce_is_also_blocked() {
        // maxWait must be strictly greater than debounce (spec §4.4: `maxWait <= debounce` is an error).
        let config = ChannelConfig { debounce_ms: Some(200), max_wait_ms: Some(200), ..base() };
        let (compiled, _warnings) = compile(config).unwrap();
        assert!(compiled.flags.is_blocked);
        assert_eq!(compiled.flags.block_reason.as_deref(), Some("maxWait must be greater than debounce"));
    }

    #[test]
    fn max_wait_above_debounce_is_accepted() {
        let config = ChannelConfig { debounce_ms: Some(200), max_wait_ms: Some(201), ..base() };
        let (compiled, _warnings) = compile(config).unwrap();
        assert!(!compiled.flags.is_blocked);
    }

    #[test]
    fn throttle_and_debounce_together_are_mutually_exclusive() {
        let config = ChannelConfig { throttle_ms: Some(100), debounce_ms: Some(100), ..base() };
        let (compiled, _warnings) = compile(config).unwrap();
        assert!(compiled.flags.is_blocked);
        assert_eq!(compiled.flags.block_reason.as_deref(), Some("throttle and debounce cannot both be set on the same channel"));
    }

    #[test]
    fn sub_floor_durations_warn_without_blocking() {
        let config = ChannelConfig {
            throttle_ms: Some(5),
            interval_ms: None,
            ..base()
        };
        let (compiled, warnings) = compile(config).unwrap();
        assert!(!compiled.flags.is_blocked);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("throttle"));

        let config = ChannelConfig { debounce_ms: Some(20), ..base() };
        let (compiled, warnings) = compile(config).unwrap();
        assert!(!compiled.flags.is_blocked);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("debounce"));

        let config = ChannelConfig { interval_ms: Some(50), repeat: Some(2), ..base() };
        let (compiled, warnings) = compile(config).unwrap();
        assert!(!compiled.flags.is_blocked);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("interval"));
    }

    #[test]
    fn schema_without_required_warns() {
        let config = ChannelConfig { schema: Some(std::sync::Arc::new(|_: &serde_json::Value| Ok(()))), ..base() };
        let (_compiled, warnings) = compile(config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("schema"));
    }

    #[test]
    fn transform_without_detect_changes_warns() {
        let config = ChannelConfig { transform: Some(std::sync::Arc::new(|payload: serde_json::Value| payload)), ..base() };
        let (_compiled, warnings) = compile(config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("transform"));
    }

    #[test]
    fn pipeline_preserves_canonical_order() {
        let config = ChannelConfig {
            required: true,
            condition: Some(std::sync::Arc::new(|_| true)),
            detect_changes: true,
            ..base()
        };
        let (compiled, _warnings) = compile(config).unwrap();
        let kinds: Vec<&str> = compiled.pipeline.iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec!["required", "condition", "detect_changes"]);
    }

    #[test]
    fn block_flag_is_independent_of_protections() {
        let config = ChannelConfig { block: true, ..base() };
        let (compiled, _warnings) = compile(config).unwrap();
        assert!(compiled.flags.is_blocked);
        assert!(compiled.flags.block_reason.is_none());
        assert!(compiled.flags.has_fast_path);
    }
}
