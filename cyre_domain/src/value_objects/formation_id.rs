// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Identifier for a TimeKeeper [`crate::entities::formation::Formation`].

use super::generic_id::{GenericId, IdCategory};

/// Marker type for [`FormationId`].
#[derive(Debug)]
pub struct FormationMarker;

impl IdCategory for FormationMarker {
    fn category_name() -> &'static str {
        "formation"
    }
}

/// Identifies a single scheduled timer entry owned by the TimeKeeper. One
/// channel call site may own several formations over its lifetime (a new
/// formation is created each time `keep` is invoked for that channel).
pub type FormationId = GenericId<FormationMarker>;
