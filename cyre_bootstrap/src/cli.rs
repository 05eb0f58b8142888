// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Command-line interface
//!
//! Clap-derived argument parsing plus a thin validation pass that turns a
//! raw [`Cli`] into a [`ValidatedCli`] (e.g. rejecting a `--config`/`Validate`
//! path that doesn't exist) before anything tries to load it.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use thiserror::Error;

use crate::config::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "cyre", version, about = "Cyre reactive action bus bootstrap")]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Minimum log level.
    #[arg(long, value_enum, default_value_t = LogLevelArg::Info, global = true)]
    pub log_level: LogLevelArg,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty, global = true)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Boot the runtime and block until a shutdown signal arrives.
    Run,
    /// Load and validate a configuration file without starting the runtime.
    Validate {
        /// Path to the TOML configuration file to validate.
        config: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevelArg {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevelArg::Error => "error",
            LogLevelArg::Warn => "warn",
            LogLevelArg::Info => "info",
            LogLevelArg::Debug => "debug",
            LogLevelArg::Trace => "trace",
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormatArg {
    #[default]
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

/// Parsing/validation errors surfaced before any channel or runtime exists.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),
}

/// `Cli` after the path/value checks below have all passed.
#[derive(Debug, Clone)]
pub struct ValidatedCli {
    pub command: ValidatedCommand,
    pub config: Option<PathBuf>,
    pub log_level: LogLevelArg,
    pub log_format: LogFormatArg,
}

#[derive(Debug, Clone)]
pub enum ValidatedCommand {
    Run,
    Validate { config: PathBuf },
}

/// Parses `std::env::args` and validates the result.
pub fn parse_and_validate() -> Result<ValidatedCli, ParseError> {
    validate_cli(Cli::parse())
}

fn validate_cli(cli: Cli) -> Result<ValidatedCli, ParseError> {
    if let Some(path) = &cli.config {
        if !path.exists() {
            return Err(ParseError::ConfigNotFound(path.clone()));
        }
    }

    let command = match cli.command {
        Commands::Run => ValidatedCommand::Run,
        Commands::Validate { config } => {
            if !config.exists() {
                return Err(ParseError::ConfigNotFound(config));
            }
            ValidatedCommand::Validate { config }
        }
    };

    Ok(ValidatedCli { command, config: cli.config, log_level: cli.log_level, log_format: cli.log_format })
}
