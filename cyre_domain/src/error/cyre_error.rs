// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `CyreError`
//!
//! Domain-specific errors for the channel bus. Each variant is a distinct
//! failure mode from one of the four categories in the error taxonomy:
//! registration errors, call rejections, scheduler failures, and internal
//! invariant violations. Handler panics are caught at the call engine and
//! are represented separately (`HandlerPanicked`) rather than propagated.
//!
//! # Recoverability
//!
//! - **Local recovery** (never surfaced past the call site): `ChannelBlocked`,
//!   `Throttled`, `Debounced`, `Recuperating`, `NoSubscriber`,
//!   `PipelineRejected`, `HandlerPanicked`.
//! - **Surfaced to the caller of `action`/`keep`**: `InvalidConfiguration`,
//!   `InvalidPath`, `SchedulerError`.
//! - **Never surfaced to user code**: `IndexInconsistent`, `InternalError` —
//!   logged and, where possible, self-healed.

use thiserror::Error;

/// Domain-specific errors for the Cyre channel bus.
#[derive(Error, Debug, Clone)]
pub enum CyreError {
    /// A channel config field or cross-rule failed validation at compile
    /// time (spec §4.4). Carries the field/rule name and reason.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A hierarchical path failed `PathIndex::is_valid_path`.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("channel not found: {0}")]
    ChannelNotFound(String),

    #[error("channel is blocked: {0}")]
    ChannelBlocked(String),

    #[error("throttled: {remaining_ms}ms remaining")]
    Throttled { remaining_ms: u64 },

    #[error("debounced: call accepted, execution deferred {delay_ms}ms")]
    Debounced { delay_ms: u64 },

    #[error("recuperating: only critical-priority channels execute")]
    Recuperating,

    #[error("no subscriber for channel: {0}")]
    NoSubscriber(String),

    #[error("pipeline stage rejected payload: {0}")]
    PipelineRejected(String),

    #[error("handler panicked: {0}")]
    HandlerPanicked(String),

    #[error("scheduler error: {0}")]
    SchedulerError(String),

    #[error("path/channel index inconsistency: {0}")]
    IndexInconsistent(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl CyreError {
    /// Returns `true` for errors that represent an expected, retryable
    /// outcome of a `call` (throttle/debounce/recuperation), as opposed to a
    /// registration mistake or an internal fault.
    pub fn is_call_rejection(&self) -> bool {
        matches!(
            self,
            CyreError::ChannelBlocked(_)
                | CyreError::Throttled { .. }
                | CyreError::Debounced { .. }
                | CyreError::Recuperating
                | CyreError::NoSubscriber(_)
                | CyreError::PipelineRejected(_)
                | CyreError::HandlerPanicked(_)
        )
    }

    /// Returns `true` for failures that must never be surfaced to user code
    /// per spec §7 bullet 5 (fatal invariants are logged and self-healed).
    pub fn is_fatal_invariant(&self) -> bool {
        matches!(self, CyreError::IndexInconsistent(_) | CyreError::InternalError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_rejections_are_classified() {
        assert!(CyreError::Throttled { remaining_ms: 10 }.is_call_rejection());
        assert!(CyreError::Recuperating.is_call_rejection());
        assert!(!CyreError::InvalidConfiguration("x".into()).is_call_rejection());
    }

    #[test]
    fn fatal_invariants_are_classified() {
        assert!(CyreError::IndexInconsistent("x".into()).is_fatal_invariant());
        assert!(!CyreError::Throttled { remaining_ms: 1 }.is_fatal_invariant());
    }
}
