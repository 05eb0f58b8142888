// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Observability wiring
//!
//! Installs a global `tracing` subscriber for the runtime. Every call
//! engine step, timer dispatch, and breathing transition is already
//! instrumented with `tracing` spans/events elsewhere; this module is only
//! responsible for turning those into output (pretty for local development,
//! JSON for anything that ships logs to an aggregator).

use tracing_subscriber::{fmt, EnvFilter};

/// Output format for the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration, typically sourced from
/// [`crate::infrastructure::config::RuntimeConfig`] or
/// `cyre_bootstrap`'s CLI flags.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive string, e.g. `"cyre=debug,info"`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_string(), format: LogFormat::default() }
    }
}

/// Installs the global `tracing` subscriber. Safe to call at most once per
/// process; a second call is a no-op (the error from
/// `tracing::subscriber::set_global_default` is discarded) so tests that
/// each try to initialize logging don't panic on the second invocation.
pub fn init(config: LoggingConfig) {
    let env_filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match config.format {
        LogFormat::Pretty => fmt().with_env_filter(env_filter).try_init(),
        LogFormat::Json => fmt().json().with_env_filter(env_filter).try_init(),
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_is_pretty() {
        assert_eq!(LoggingConfig::default().format, LogFormat::Pretty);
    }
}
