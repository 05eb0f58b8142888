// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Structured logging, wired through `tracing` + `tracing-subscriber`.

pub mod observability;

pub use observability::{init, LogFormat, LoggingConfig};
