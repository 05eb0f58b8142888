// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `Formation`
//!
//! A single scheduled timer entry owned by the TimeKeeper (spec §4.2). Every
//! `interval`/`delay` registration, and every debounce deferral, creates one
//! formation; the TimeKeeper is the only component that advances or
//! dispatches them.

use crate::value_objects::{ChannelId, FormationId, Repeat};

/// Lifecycle state of a [`Formation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationStatus {
    /// Counting down to its next fire time.
    Active,
    /// Suspended by `pause`; retains `next_fire_at_ms` so `resume` can
    /// continue rather than restart the interval.
    Paused,
    /// Exhausted its `repeat` count; eligible for cleanup.
    Completed,
    /// Removed by `forget` before completion.
    Cancelled,
}

/// A single scheduled timer entry.
#[derive(Debug, Clone)]
pub struct Formation {
    pub id: FormationId,
    pub channel_id: ChannelId,
    /// Epoch milliseconds of the next scheduled dispatch.
    pub next_fire_at_ms: u64,
    /// Milliseconds between dispatches; `None` for a one-shot delay.
    pub interval_ms: Option<u64>,
    pub repeat: Repeat,
    pub executions: u64,
    pub status: FormationStatus,
}

impl Formation {
    pub fn new(
        channel_id: ChannelId,
        first_fire_at_ms: u64,
        interval_ms: Option<u64>,
        repeat: Repeat,
    ) -> Self {
        Self {
            id: FormationId::new(),
            channel_id,
            next_fire_at_ms: first_fire_at_ms,
            interval_ms,
            repeat,
            executions: 0,
            status: FormationStatus::Active,
        }
    }

    /// Whether this formation still has at least one execution left after
    /// its current `executions` count.
    pub fn has_remaining(&self) -> bool {
        self.repeat.has_remaining(self.executions)
    }

    /// Records one dispatch and advances `next_fire_at_ms` by `interval_ms`
    /// if repeating, otherwise marks the formation `Completed`.
    pub fn advance(&mut self) {
        self.executions += 1;
        if !self.has_remaining() {
            self.status = FormationStatus::Completed;
            return;
        }
        match self.interval_ms {
            Some(interval) => self.next_fire_at_ms += interval,
            None => self.status = FormationStatus::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_id() -> ChannelId {
        ChannelId::new("test").unwrap()
    }

    #[test]
    fn advance_reschedules_repeating_formation() {
        let mut f = Formation::new(channel_id(), 1000, Some(500), Repeat::Times(2));
        f.advance();
        assert_eq!(f.next_fire_at_ms, 1500);
        assert_eq!(f.status, FormationStatus::Active);
        f.advance();
        assert_eq!(f.status, FormationStatus::Completed);
    }

    #[test]
    fn one_shot_completes_after_single_advance() {
        let mut f = Formation::new(channel_id(), 1000, None, Repeat::Once);
        f.advance();
        assert_eq!(f.status, FormationStatus::Completed);
    }
}
