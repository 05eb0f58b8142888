// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Signal handling
//!
//! Cross-platform SIGTERM/SIGINT (and SIGHUP on Unix) handling for graceful
//! shutdown. `SystemSignals` is a trait rather than a bare function so a
//! `NoOpSignalHandler` can stand in during tests without ever touching a
//! real process signal.

use std::future::Future;
use std::pin::Pin;

/// Invoked once, when a shutdown-triggering signal arrives.
pub type ShutdownCallback = Box<dyn FnOnce() + Send + 'static>;

/// Waits for a platform shutdown signal and invokes a callback.
pub trait SystemSignals: Send + Sync {
    fn wait_for_signal(&self, on_shutdown: ShutdownCallback) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// SIGTERM/SIGINT/SIGHUP via `tokio::signal::unix`.
#[cfg(unix)]
pub struct UnixSignalHandler;

#[cfg(unix)]
impl UnixSignalHandler {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
impl Default for UnixSignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
impl SystemSignals for UnixSignalHandler {
    fn wait_for_signal(&self, on_shutdown: ShutdownCallback) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(s) => s,
                Err(err) => {
                    tracing::error!(%err, "failed to register SIGTERM handler");
                    return;
                }
            };
            let mut sigint = match signal(SignalKind::interrupt()) {
                Ok(s) => s,
                Err(err) => {
                    tracing::error!(%err, "failed to register SIGINT handler");
                    return;
                }
            };
            let mut sighup = match signal(SignalKind::hangup()) {
                Ok(s) => s,
                Err(err) => {
                    tracing::error!(%err, "failed to register SIGHUP handler");
                    return;
                }
            };

            tokio::select! {
                _ = sigterm.recv() => tracing::info!("received SIGTERM, initiating graceful shutdown"),
                _ = sigint.recv() => tracing::info!("received SIGINT, initiating graceful shutdown"),
                _ = sighup.recv() => tracing::info!("received SIGHUP, initiating graceful shutdown"),
            }

            on_shutdown();
        })
    }
}

/// Ctrl+C via `tokio::signal::ctrl_c`.
#[cfg(windows)]
pub struct WindowsSignalHandler;

#[cfg(windows)]
impl WindowsSignalHandler {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl Default for WindowsSignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(windows)]
impl SystemSignals for WindowsSignalHandler {
    fn wait_for_signal(&self, on_shutdown: ShutdownCallback) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(%err, "failed to register Ctrl+C handler");
                return;
            }
            tracing::info!("received Ctrl+C, initiating graceful shutdown");
            on_shutdown();
        })
    }
}

/// Never fires. Lets tests drive shutdown explicitly instead of racing a
/// real signal.
pub struct NoOpSignalHandler;

impl NoOpSignalHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpSignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemSignals for NoOpSignalHandler {
    fn wait_for_signal(&self, _on_shutdown: ShutdownCallback) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(std::future::pending())
    }
}

/// The signal handler for the current platform.
pub fn create_signal_handler() -> Box<dyn SystemSignals> {
    #[cfg(unix)]
    {
        Box::new(UnixSignalHandler::new())
    }

    #[cfg(windows)]
    {
        Box::new(WindowsSignalHandler::new())
    }

    #[cfg(not(any(unix, windows)))]
    {
        compile_error!("unsupported platform for signal handling");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn noop_handler_never_fires() {
        let handler = NoOpSignalHandler::new();
        let called = Arc::new(AtomicBool::new(false));
        let called_clone = called.clone();

        let wait = handler.wait_for_signal(Box::new(move || called_clone.store(true, Ordering::SeqCst)));

        tokio::select! {
            _ = wait => panic!("no-op handler should never complete"),
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {}
        }

        assert!(!called.load(Ordering::SeqCst));
    }

    #[test]
    fn create_signal_handler_does_not_panic() {
        let _handler = create_signal_handler();
    }
}
