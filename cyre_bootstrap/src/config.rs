// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Bootstrap configuration
//!
//! Loads the settings a `cyre_bootstrap` binary needs before it can
//! construct a [`cyre::Runtime`]: the runtime's own `RuntimeConfig` (history
//! depth, breathing thresholds) plus the two bootstrap-only knobs (log level,
//! log format) that CLI flags can override. Sourced from an optional TOML
//! file, then `CYRE_`-prefixed environment variables, in that precedence
//! order (env wins).

use ::config::{Config, Environment, File};
use cyre::RuntimeConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// Bootstrap-phase configuration: the runtime's own settings plus the
/// logging knobs that only make sense before a `Runtime` exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub runtime: RuntimeConfig,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self { runtime: RuntimeConfig::default(), log_level: "info".to_string(), log_format: LogFormat::default() }
    }
}

/// Mirrors `cyre::infrastructure::logging::LogFormat` so this crate doesn't
/// need to depend on `cyre`'s infrastructure module layout for a two-variant
/// enum; converted at the call site that installs the subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl BootstrapConfig {
    /// Loads configuration from `path` (if given) layered under
    /// `CYRE_`-prefixed environment variables (e.g. `CYRE_LOG_LEVEL=debug`,
    /// `CYRE_RUNTIME__BREATHING__HIGH_WATERMARK=0.9`). Missing sources and
    /// missing fields fall back to [`BootstrapConfig::default`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(Environment::with_prefix("CYRE").separator("__"));

        let raw = builder.build()?;
        Ok(raw.try_deserialize()?)
    }

    /// An `EnvFilter` directive string derived from `log_level`, scoping
    /// verbose levels to this crate's own targets and leaving everything
    /// else at `info`.
    pub fn tracing_filter(&self) -> String {
        format!("cyre={0},cyre_domain={0},cyre_bootstrap={0},info", self.log_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_sources() {
        let config = BootstrapConfig::load(None).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn tracing_filter_scopes_crate_targets() {
        let config = BootstrapConfig { log_level: "debug".into(), ..Default::default() };
        assert_eq!(config.tracing_filter(), "cyre=debug,cyre_domain=debug,cyre_bootstrap=debug,info");
    }
}
