// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `ActionOutcome`
//!
//! The result of a successful `action()` registration (spec §6:
//! `action(...) -> {ok, message, errors?, warnings?}`). Registration only
//! fails outright (`Err`) when `id`/`path` don't parse; everything else spec
//! §4.4's cross-rule table flags is still stored, so a caller needs to see
//! whether the channel it just registered came back blocked, and what (if
//! anything) it should clean up before relying on it.

use crate::value_objects::ChannelId;

/// Returned by `action()` on success. A registration can still be blocked
/// (see [`ActionOutcome::blocked`]) or carry non-fatal warnings.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub id: ChannelId,
    /// `true` when the compiled record failed a spec §4.4 cross-rule (or
    /// was registered with `block: true`); the channel is stored but
    /// `call()` will reject every invocation against it.
    pub blocked: bool,
    /// Set alongside `blocked` when a cross-rule (not an explicit
    /// `block: true`) is what caused it.
    pub block_reason: Option<String>,
    /// Non-blocking cross-rule warnings (sub-floor durations, `schema`
    /// without `required`, `transform` without `detectChanges`).
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_without_reason_is_representable() {
        let outcome = ActionOutcome {
            id: ChannelId::new("x").unwrap(),
            blocked: true,
            block_reason: None,
            warnings: Vec::new(),
        };
        assert!(outcome.blocked);
        assert!(outcome.block_reason.is_none());
    }
}
