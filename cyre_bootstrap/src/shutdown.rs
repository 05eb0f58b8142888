// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Shutdown coordination
//!
//! Wraps `tokio_util::sync::CancellationToken` with a grace period: signal
//! handlers call `initiate_shutdown()`, worker tasks race their own work
//! against `token().cancelled()`, and the demo binary's main loop calls
//! `wait_for_shutdown()` to block for at most `grace_period` before forcing
//! an exit.
//!
//! ## Usage
//!
//! ```
//! use cyre_bootstrap::shutdown::ShutdownCoordinator;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let coordinator = ShutdownCoordinator::new(Duration::from_secs(5));
//!     let token = coordinator.token();
//!
//!     tokio::spawn(async move {
//!         tokio::select! {
//!             _ = token.cancelled() => println!("worker shutting down"),
//!             _ = tokio::time::sleep(Duration::from_secs(1)) => println!("worker tick"),
//!         }
//!     });
//!
//!     coordinator.initiate_shutdown();
//!     coordinator.complete_shutdown();
//!     coordinator.wait_for_shutdown().await;
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_GRACE_PERIOD_SECS: u64 = 5;

/// Coordinates graceful shutdown across signal handlers and worker tasks.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    token: CancellationToken,
    grace_period: Duration,
    shutdown_initiated: Arc<AtomicBool>,
    shutdown_complete: Arc<Notify>,
}

impl ShutdownCoordinator {
    pub fn new(grace_period: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            grace_period,
            shutdown_initiated: Arc::new(AtomicBool::new(false)),
            shutdown_complete: Arc::new(Notify::new()),
        }
    }

    /// A cancellation token worker tasks can clone and race against.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_initiated.load(Ordering::SeqCst)
    }

    /// Cancels the token and marks shutdown as initiated. Idempotent.
    pub fn initiate_shutdown(&self) {
        if self.shutdown_initiated.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_ok() {
            tracing::info!(grace_period_ms = self.grace_period.as_millis() as u64, "initiating graceful shutdown");
            self.token.cancel();
        }
    }

    /// Blocks until `complete_shutdown()` is called or the grace period
    /// elapses, whichever comes first. Returns `true` if shutdown completed
    /// within the grace period.
    pub async fn wait_for_shutdown(&self) -> bool {
        if !self.is_shutting_down() {
            tracing::warn!("wait_for_shutdown called but shutdown not initiated");
            return true;
        }

        tokio::select! {
            _ = self.shutdown_complete.notified() => {
                tracing::info!("shutdown completed gracefully");
                true
            }
            _ = tokio::time::sleep(self.grace_period) => {
                tracing::warn!("shutdown grace period expired, forcing exit");
                false
            }
        }
    }

    /// Waits with a caller-supplied timeout instead of the configured grace
    /// period.
    pub async fn wait_with_timeout(&self, timeout: Duration) -> bool {
        if !self.is_shutting_down() {
            return true;
        }
        tokio::select! {
            _ = self.shutdown_complete.notified() => true,
            _ = tokio::time::sleep(timeout) => false,
        }
    }

    /// Notifies anyone in `wait_for_shutdown`/`wait_with_timeout` that
    /// cleanup has finished.
    pub fn complete_shutdown(&self) {
        self.shutdown_complete.notify_waiters();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_GRACE_PERIOD_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_coordinator_is_not_shutting_down() {
        let coordinator = ShutdownCoordinator::default();
        assert!(!coordinator.is_shutting_down());
        assert!(!coordinator.token().is_cancelled());
    }

    #[test]
    fn initiate_shutdown_cancels_the_token() {
        let coordinator = ShutdownCoordinator::new(Duration::from_secs(5));
        let token = coordinator.token();

        coordinator.initiate_shutdown();

        assert!(coordinator.is_shutting_down());
        assert!(token.is_cancelled());
    }

    #[test]
    fn initiate_shutdown_is_idempotent() {
        let coordinator = ShutdownCoordinator::new(Duration::from_secs(5));
        coordinator.initiate_shutdown();
        coordinator.initiate_shutdown();
        assert!(coordinator.is_shutting_down());
    }

    #[tokio::test]
    async fn wait_for_shutdown_returns_true_on_completion() {
        let coordinator = ShutdownCoordinator::new(Duration::from_secs(5));
        coordinator.initiate_shutdown();

        let coordinator_clone = coordinator.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            coordinator_clone.complete_shutdown();
        });

        let result = tokio::time::timeout(Duration::from_millis(200), coordinator.wait_for_shutdown()).await;
        assert_eq!(result, Ok(true));
    }

    #[tokio::test]
    async fn wait_for_shutdown_times_out_without_completion() {
        let coordinator = ShutdownCoordinator::new(Duration::from_millis(30));
        coordinator.initiate_shutdown();

        assert!(!coordinator.wait_for_shutdown().await);
    }

    #[tokio::test]
    async fn wait_with_timeout_honors_custom_duration() {
        let coordinator = ShutdownCoordinator::new(Duration::from_secs(10));
        coordinator.initiate_shutdown();

        assert!(!coordinator.wait_with_timeout(Duration::from_millis(30)).await);
    }
}
