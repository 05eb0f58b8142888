// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `Handler` port
//!
//! The user-supplied callback a channel runs on a successful call (spec
//! §4.5 step 8). Async because handlers may themselves await I/O; the call
//! engine invokes this behind a panic boundary so a handler panic becomes
//! [`crate::error::CyreError::HandlerPanicked`] rather than unwinding across
//! the scheduler.

use crate::error::CyreError;
use async_trait::async_trait;
use serde_json::Value;

/// A channel's subscribed callback.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Invokes the handler with the (possibly selected/transformed) payload.
    async fn handle(&self, payload: Value) -> Result<Value, CyreError>;
}

#[async_trait]
impl<F, Fut> Handler for F
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: std::future::Future<Output = Result<Value, CyreError>> + Send,
{
    async fn handle(&self, payload: Value) -> Result<Value, CyreError> {
        (self)(payload).await
    }
}
