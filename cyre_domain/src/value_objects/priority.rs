// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Channel priority, used by the breathing controller to decide which
//! channels still execute while the system is recuperating.

use serde::{Deserialize, Serialize};

/// Execution priority of a channel. Ordered low to high; `Critical` is the
/// only priority that still executes while the breathing controller is in
/// recuperation (spec §5.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl Priority {
    /// `true` only for [`Priority::Critical`] — the single priority allowed
    /// to bypass recuperation.
    pub fn bypasses_recuperation(self) -> bool {
        matches!(self, Priority::Critical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_critical_bypasses_recuperation() {
        assert!(Priority::Critical.bypasses_recuperation());
        assert!(!Priority::High.bypasses_recuperation());
        assert!(!Priority::Normal.bypasses_recuperation());
        assert!(!Priority::Low.bypasses_recuperation());
    }

    #[test]
    fn ordering_is_low_to_high() {
        assert!(Priority::Low < Priority::Normal);
        assert!(Priority::Normal < Priority::High);
        assert!(Priority::High < Priority::Critical);
    }
}
