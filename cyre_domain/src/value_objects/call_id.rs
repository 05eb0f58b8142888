// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Identifier correlating one `call()` invocation across the pipeline, the
//! bouncer, scheduling, and the handler invocation, for log correlation.

use super::generic_id::{GenericId, IdCategory};

/// Marker type for [`CallId`].
#[derive(Debug)]
pub struct CallMarker;

impl IdCategory for CallMarker {
    fn category_name() -> &'static str {
        "call"
    }
}

/// A per-invocation trace id. Not part of the persisted channel state; it
/// exists only for the lifetime of a single `call()` and its log spans.
pub type CallId = GenericId<CallMarker>;
