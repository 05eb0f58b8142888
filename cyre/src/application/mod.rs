// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Application layer: the use-case services (`CallEngine`, `Runtime`,
//! `Branch`) that orchestrate the domain's entities and ports into the
//! public surface embedding applications call.

pub mod services;

pub use services::{Branch, CallEngine, Runtime, RuntimeConfig};
