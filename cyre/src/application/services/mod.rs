// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

pub mod branch;
pub mod call_engine;
pub mod runtime;

pub use branch::Branch;
pub use call_engine::CallEngine;
pub use runtime::{Runtime, RuntimeConfig};
