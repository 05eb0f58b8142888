// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Payload state
//!
//! Every channel keeps its most recent payload (for `detectChanges` and for
//! `get()` queries) plus a bounded ring of prior payloads (spec §4.6/§7),
//! so a caller can inspect recent history without the unbounded memory
//! growth a plain `Vec` would accumulate over a long-running channel.

use serde_json::Value;

/// Where a stored payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSource {
    /// Supplied directly via `call()`.
    Call,
    /// Produced by the TimeKeeper re-firing a scheduled formation.
    Scheduled,
    /// Supplied via a [`crate::entities`]-level branch call.
    Branch,
}

/// One historical payload entry.
#[derive(Debug, Clone)]
pub struct PayloadEntry {
    pub value: Value,
    pub source: PayloadSource,
    pub recorded_at_ms: u64,
}

/// A fixed-capacity ring buffer of [`PayloadEntry`] values, oldest-first.
/// Pushing past capacity evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct PayloadHistory {
    capacity: usize,
    entries: std::collections::VecDeque<PayloadEntry>,
}

impl PayloadHistory {
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), entries: std::collections::VecDeque::with_capacity(capacity) }
    }

    pub fn push(&mut self, entry: PayloadEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// The most recently pushed entry, if any.
    pub fn latest(&self) -> Option<&PayloadEntry> {
        self.entries.back()
    }

    /// All entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PayloadEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
