// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `CyreResponse`
//!
//! The uniform envelope every `call()` resolves to (spec §4.5/§7), whether
//! the call succeeded, was rejected by a protection, or failed validation.
//! Callers branch on `ok`, not on the `Result` error channel — rejections
//! such as throttling are an expected, well-formed response, not a Rust
//! `Err`. `metadata` carries auxiliary detail (the call id, protection
//! timing) without expanding the envelope shape itself.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured metadata attached to a response, beyond the envelope's own
/// fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub call_id: Option<String>,
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
    /// Set when a `detectChanges` stage short-circuited the call because the
    /// payload was structurally identical to the channel's last stored one.
    #[serde(skip_serializing_if = "is_false")]
    pub no_change: bool,
}

fn is_false(value: &bool) -> bool {
    !value
}

/// The envelope returned from every `call()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CyreResponse {
    pub ok: bool,
    pub payload: Value,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: u64,
    pub metadata: ResponseMetadata,
}

impl CyreResponse {
    pub fn success(payload: Value, message: impl Into<String>, timestamp: u64, metadata: ResponseMetadata) -> Self {
        Self { ok: true, payload, message: message.into(), error: None, timestamp, metadata }
    }

    pub fn rejected(
        message: impl Into<String>,
        error: impl Into<String>,
        timestamp: u64,
        metadata: ResponseMetadata,
    ) -> Self {
        Self {
            ok: false,
            payload: Value::Null,
            message: message.into(),
            error: Some(error.into()),
            timestamp,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_has_no_error() {
        let r = CyreResponse::success(Value::from(1), "ok", 0, ResponseMetadata::default());
        assert!(r.ok);
        assert!(r.error.is_none());
    }

    #[test]
    fn rejected_has_null_payload() {
        let r = CyreResponse::rejected("throttled", "Throttled", 0, ResponseMetadata::default());
        assert!(!r.ok);
        assert_eq!(r.payload, Value::Null);
    }
}
