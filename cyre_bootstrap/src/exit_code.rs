// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Exit codes
//!
//! Maps [`cyre::CyreError`] categories (and bootstrap-local parse/config
//! errors) to Unix exit codes, following BSD `sysexits.h` conventions.

use cyre::CyreError;
use std::fmt;

/// Process exit codes following Unix conventions (BSD `sysexits.h`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful termination (0).
    #[default]
    Success = 0,

    /// General, uncategorized error (1).
    Error = 1,

    /// Command line usage error (64): bad arguments, unknown flags.
    UsageError = 64,

    /// Input data or configuration failed validation (65).
    DataError = 65,

    /// Required channel/config/file could not be found (66).
    NoInput = 66,

    /// Internal software error: an invariant the call engine should never
    /// violate was violated anyway (70).
    Software = 70,

    /// Configuration error: malformed or missing required settings (78).
    Config = 78,

    /// Interrupted by SIGINT / Ctrl+C (130).
    Interrupted = 130,

    /// Terminated by SIGTERM (143).
    Terminated = 143,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Success)
    }

    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "success",
            ExitCode::Error => "general error",
            ExitCode::UsageError => "command line usage error",
            ExitCode::DataError => "data format error",
            ExitCode::NoInput => "cannot open input",
            ExitCode::Software => "internal software error",
            ExitCode::Config => "configuration error",
            ExitCode::Interrupted => "interrupted (SIGINT)",
            ExitCode::Terminated => "terminated (SIGTERM)",
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code.as_i32()
    }
}

/// Maps a `CyreError` surfaced through `anyhow::Error` to an exit code.
/// Errors from other sources (CLI parsing, config loading) fall back to
/// `ExitCode::Error`.
pub fn map_error_to_exit_code(error: &anyhow::Error) -> ExitCode {
    if let Some(cyre_err) = error.downcast_ref::<CyreError>() {
        return match cyre_err {
            CyreError::InvalidConfiguration(_) | CyreError::InvalidPath(_) => ExitCode::Config,
            CyreError::ChannelNotFound(_) | CyreError::NoSubscriber(_) => ExitCode::NoInput,
            CyreError::IndexInconsistent(_) | CyreError::InternalError(_) | CyreError::SchedulerError(_) => {
                ExitCode::Software
            }
            CyreError::ChannelBlocked(_)
            | CyreError::Throttled { .. }
            | CyreError::Debounced { .. }
            | CyreError::Recuperating
            | CyreError::PipelineRejected(_)
            | CyreError::HandlerPanicked(_) => ExitCode::DataError,
        };
    }
    ExitCode::Error
}

/// Converts the outcome of the bootstrap's top-level `run()` into an exit
/// code, ready for `std::process::exit`.
pub fn result_to_exit_code<T>(result: &anyhow::Result<T>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::Success,
        Err(err) => map_error_to_exit_code(err),
    }
}
