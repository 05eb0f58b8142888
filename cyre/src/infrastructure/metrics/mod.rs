// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! In-process metrics: `prometheus` counters/gauges for call outcomes,
//! active formations, and the breathing rate.

pub mod service;

pub use service::{MetricsService, MetricsSnapshot};
