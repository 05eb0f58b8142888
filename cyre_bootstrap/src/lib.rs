// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Cyre bootstrap
//!
//! Everything a `cyre`-embedding process needs that sits **outside** the
//! domain/application/infrastructure layers: CLI argument parsing, signal
//! handling, process exit codes, and bootstrap-phase logging and
//! configuration. Cyre itself (the `cyre`/`cyre_domain` crates) never
//! depends on this crate — an embedding application can construct a
//! `Runtime` directly without ever touching a CLI.
//!
//! ## Module structure
//!
//! - [`cli`] - clap-derived argument parsing and validation
//! - [`config`] - loads [`cyre::RuntimeConfig`] plus bootstrap-only settings
//! - [`platform`] - OS facts for the startup banner (Unix/Windows)
//! - [`signals`] - SIGTERM/SIGINT/SIGHUP handling
//! - [`shutdown`] - grace-period shutdown coordination
//! - [`exit_code`] - maps `CyreError` categories to Unix exit codes
//! - [`logger`] - lightweight logging for the window before the full
//!   `tracing` subscriber is installed
//!
//! The `cyre-demo` binary under `src/bin` wires all of these together to
//! boot a `Runtime`, register a couple of demo channels, and run until a
//! shutdown signal arrives.

pub mod cli;
pub mod config;
pub mod exit_code;
pub mod logger;
pub mod platform;
pub mod shutdown;
pub mod signals;

pub use cli::{parse_and_validate, ValidatedCli, ValidatedCommand};
pub use exit_code::{map_error_to_exit_code, result_to_exit_code, ExitCode};

/// Parses and validates `std::env::args`. The caller runs the application
/// logic against the returned [`ValidatedCli`] and maps the outcome to an
/// exit code with [`result_to_exit_code`].
///
/// # Example
///
/// ```no_run
/// use cyre_bootstrap::{bootstrap_cli, result_to_exit_code};
///
/// #[tokio::main]
/// async fn main() {
///     let cli = match bootstrap_cli() {
///         Ok(cli) => cli,
///         Err(err) => {
///             eprintln!("cli error: {err}");
///             std::process::exit(64); // EX_USAGE
///         }
///     };
///
///     let result = run_application(cli).await;
///     std::process::exit(result_to_exit_code(&result).as_i32());
/// }
///
/// async fn run_application(_cli: cyre_bootstrap::ValidatedCli) -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
pub fn bootstrap_cli() -> Result<ValidatedCli, cli::ParseError> {
    cli::parse_and_validate()
}
