// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! This module provides the hierarchical error type for the Cyre domain. It
//! categorizes registration failures, call rejections, scheduler failures, and
//! internal invariant violations so that callers can pattern-match on the
//! failure category instead of parsing message strings.

pub mod cyre_error;

pub use cyre_error::CyreError;
