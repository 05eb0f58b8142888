// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Repeat count for a scheduled channel.

use crate::error::CyreError;
use serde::{Deserialize, Serialize};

/// How many times a scheduled call's handler should run.
///
/// `repeat: 0` is not representable here — [`Repeat::from_count`] rejects it
/// as a registration-time cross-rule error (a channel scheduled to run zero
/// times is a configuration mistake, not a valid "do nothing" channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Run exactly once (the default for any channel with `interval`/`delay`
    /// but no explicit `repeat`).
    Once,
    /// Run a fixed number of times, `n >= 1`.
    Times(u64),
    /// Run indefinitely until `forget`/`pause` is called.
    Forever,
}

impl Default for Repeat {
    fn default() -> Self {
        Repeat::Once
    }
}

impl Repeat {
    /// Builds a `Repeat` from a raw `repeat` count as supplied in channel
    /// config. `None` means the default, [`Repeat::Once`]. `Some(0)` is
    /// rejected; negative values aren't representable since `count` is
    /// unsigned.
    pub fn from_count(count: Option<u64>) -> Result<Self, CyreError> {
        match count {
            None => Ok(Repeat::Once),
            Some(0) => Err(CyreError::InvalidConfiguration(
                "repeat: 0 is not valid; omit `repeat` or use a count >= 1".into(),
            )),
            Some(1) => Ok(Repeat::Once),
            Some(n) => Ok(Repeat::Times(n)),
        }
    }

    /// Whether another execution remains given `executions_so_far`.
    pub fn has_remaining(self, executions_so_far: u64) -> bool {
        match self {
            Repeat::Once => executions_so_far < 1,
            Repeat::Times(n) => executions_so_far < n,
            Repeat::Forever => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert!(Repeat::from_count(Some(0)).is_err());
    }

    #[test]
    fn default_is_once() {
        assert_eq!(Repeat::from_count(None).unwrap(), Repeat::Once);
    }

    #[test]
    fn forever_always_has_remaining() {
        assert!(Repeat::Forever.has_remaining(1_000_000));
    }

    #[test]
    fn times_exhausts_after_n_runs() {
        let r = Repeat::Times(3);
        assert!(r.has_remaining(0));
        assert!(r.has_remaining(2));
        assert!(!r.has_remaining(3));
    }
}
