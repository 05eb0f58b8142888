// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `PathIndex`
//!
//! Maintains the hierarchical path structure used to route `*`/`**` wildcard
//! subscriptions and branch lookups to concrete channels (spec §4.1). A
//! prefix tree gives O(pattern depth) wildcard matching; three auxiliary
//! forward maps (exact path, per-segment, per-depth) and one reverse map
//! (channel id → path) give O(1) answers for the non-wildcard queries the
//! call engine and presentation layer need on the hot path.
//!
//! This is a pure in-memory data structure with no locking: concurrent
//! access is the infrastructure adapter's responsibility (spec §7 —
//! single-writer/many-reader via an outer lock).

use crate::error::CyreError;
use crate::value_objects::{ChannelId, ChannelPath};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<String, TrieNode>,
    channel_ids: HashSet<ChannelId>,
}

impl TrieNode {
    fn is_empty(&self) -> bool {
        self.children.is_empty() && self.channel_ids.is_empty()
    }
}

/// Hierarchical index over registered channel paths.
#[derive(Debug, Default)]
pub struct PathIndex {
    root: TrieNode,
    reverse: HashMap<ChannelId, ChannelPath>,
    by_segment: HashMap<String, HashSet<ChannelId>>,
    by_depth: HashMap<usize, HashSet<ChannelId>>,
}

impl PathIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `raw` the same way [`ChannelPath::new`] would, without
    /// requiring the caller to construct one first.
    pub fn is_valid_path(raw: &str) -> bool {
        ChannelPath::is_valid_path(raw)
    }

    /// Registers `channel_id` at `path`. Idempotent: re-adding the same
    /// channel at the same path is a no-op; re-adding at a different path
    /// first removes the old association.
    pub fn add(&mut self, channel_id: ChannelId, path: ChannelPath) {
        if let Some(existing) = self.reverse.get(&channel_id) {
            if existing == &path {
                return;
            }
            self.remove(&channel_id);
        }

        let mut node = &mut self.root;
        for segment in path.segments() {
            node = node.children.entry(segment.to_string()).or_default();
            self.by_segment.entry(segment.to_string()).or_default().insert(channel_id.clone());
        }
        node.channel_ids.insert(channel_id.clone());
        self.by_depth.entry(path.depth()).or_default().insert(channel_id.clone());
        self.reverse.insert(channel_id, path);
    }

    /// Removes `channel_id` from every index. Returns `true` if it was
    /// present.
    pub fn remove(&mut self, channel_id: &ChannelId) -> bool {
        let Some(path) = self.reverse.remove(channel_id) else {
            return false;
        };

        for segment in path.segments() {
            if let Some(ids) = self.by_segment.get_mut(segment) {
                ids.remove(channel_id);
                if ids.is_empty() {
                    self.by_segment.remove(segment);
                }
            }
        }
        if let Some(ids) = self.by_depth.get_mut(&path.depth()) {
            ids.remove(channel_id);
            if ids.is_empty() {
                self.by_depth.remove(&path.depth());
            }
        }

        Self::remove_from_trie(&mut self.root, path.segments().collect::<Vec<_>>().as_slice(), channel_id);
        true
    }

    fn remove_from_trie(node: &mut TrieNode, segments: &[&str], channel_id: &ChannelId) -> bool {
        if segments.is_empty() {
            node.channel_ids.remove(channel_id);
            return node.is_empty();
        }
        let (head, rest) = (segments[0], &segments[1..]);
        let mut drop_child = false;
        if let Some(child) = node.children.get_mut(head) {
            if Self::remove_from_trie(child, rest, channel_id) {
                drop_child = true;
            }
        }
        if drop_child {
            node.children.remove(head);
        }
        node.is_empty()
    }

    /// Returns every channel id whose registered path matches `pattern`
    /// (`*` matches exactly one segment; `**` matches zero or more segments
    /// and may appear anywhere, including mid-pattern — `a/**/b` matches
    /// `a/b`, `a/x/b`, and `a/x/y/b`, but not bare `a` or `a/x`).
    pub fn match_pattern(&self, pattern: &str) -> Vec<ChannelId> {
        let segments: Vec<&str> = pattern.split('/').collect();
        let mut out = HashSet::new();
        Self::collect_matches(&self.root, &segments, &mut out);
        out.into_iter().collect()
    }

    fn collect_matches(node: &TrieNode, segments: &[&str], out: &mut HashSet<ChannelId>) {
        match segments.first() {
            None => out.extend(node.channel_ids.iter().cloned()),
            Some(&"**") => {
                let rest = &segments[1..];
                // Zero segments consumed by `**`: try matching whatever
                // pattern remains right here.
                Self::collect_matches(node, rest, out);
                // One more segment consumed by `**`, still inside it.
                for child in node.children.values() {
                    Self::collect_matches(child, segments, out);
                }
            }
            Some(&"*") => {
                for child in node.children.values() {
                    Self::collect_matches(child, &segments[1..], out);
                }
            }
            Some(seg) => {
                if let Some(child) = node.children.get(*seg) {
                    Self::collect_matches(child, &segments[1..], out);
                }
            }
        }
    }

    pub fn get_path(&self, channel_id: &ChannelId) -> Option<&ChannelPath> {
        self.reverse.get(channel_id)
    }

    pub fn get_by_depth(&self, depth: usize) -> Vec<ChannelId> {
        self.by_depth.get(&depth).map(|set| set.iter().cloned().collect()).unwrap_or_default()
    }

    pub fn get_by_segment(&self, segment: &str) -> Vec<ChannelId> {
        self.by_segment.get(segment).map(|set| set.iter().cloned().collect()).unwrap_or_default()
    }

    /// Discards all indexes and rebuilds them from `snapshot`. Used for
    /// self-healing when the infrastructure adapter detects a reverse-map
    /// inconsistency (spec §7 bullet 5) rather than serving stale results.
    pub fn rebuild_from<I>(&mut self, snapshot: I) -> Result<(), CyreError>
    where
        I: IntoIterator<Item = (ChannelId, ChannelPath)>,
    {
        *self = Self::new();
        for (channel_id, path) in snapshot {
            self.add(channel_id, path);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ChannelId {
        ChannelId::new(s).unwrap()
    }
    fn path(s: &str) -> ChannelPath {
        ChannelPath::new(s).unwrap()
    }

    #[test]
    fn exact_match_round_trips() {
        let mut idx = PathIndex::new();
        idx.add(id("a"), path("sensors/kitchen/temperature"));
        assert_eq!(idx.match_pattern("sensors/kitchen/temperature"), vec![id("a")]);
        assert_eq!(idx.get_path(&id("a")), Some(&path("sensors/kitchen/temperature")));
    }

    #[test]
    fn single_wildcard_matches_siblings() {
        let mut idx = PathIndex::new();
        idx.add(id("a"), path("sensors/kitchen/temperature"));
        idx.add(id("b"), path("sensors/bedroom/temperature"));
        let mut matched = idx.match_pattern("sensors/*/temperature");
        matched.sort();
        let mut expected = vec![id("a"), id("b")];
        expected.sort();
        assert_eq!(matched, expected);
    }

    #[test]
    fn double_wildcard_matches_descendants_at_any_depth() {
        let mut idx = PathIndex::new();
        idx.add(id("a"), path("sensors/kitchen/temperature"));
        idx.add(id("b"), path("sensors/kitchen"));
        let mut matched = idx.match_pattern("sensors/**");
        matched.sort();
        let mut expected = vec![id("a"), id("b")];
        expected.sort();
        assert_eq!(matched, expected);
    }

    #[test]
    fn mid_pattern_double_wildcard_honors_the_suffix() {
        let mut idx = PathIndex::new();
        idx.add(id("direct"), path("a/b"));
        idx.add(id("nested"), path("a/x/b"));
        idx.add(id("deeper"), path("a/x/y/b"));
        idx.add(id("wrong-suffix"), path("a/x"));
        idx.add(id("root-only"), path("a"));

        let mut matched = idx.match_pattern("a/**/b");
        matched.sort();
        let mut expected = vec![id("direct"), id("nested"), id("deeper")];
        expected.sort();
        assert_eq!(matched, expected);
    }

    #[test]
    fn remove_clears_all_indexes() {
        let mut idx = PathIndex::new();
        idx.add(id("a"), path("sensors/kitchen/temperature"));
        assert!(idx.remove(&id("a")));
        assert!(idx.match_pattern("sensors/**").is_empty());
        assert!(idx.get_by_segment("kitchen").is_empty());
        assert!(idx.get_by_depth(3).is_empty());
        assert!(idx.get_path(&id("a")).is_none());
    }

    #[test]
    fn rebuild_from_snapshot_restores_state() {
        let mut idx = PathIndex::new();
        idx.add(id("a"), path("sensors/kitchen/temperature"));
        let snapshot: Vec<(ChannelId, ChannelPath)> =
            vec![(id("b"), path("sensors/bedroom/temperature"))];
        idx.rebuild_from(snapshot).unwrap();
        assert!(idx.get_path(&id("a")).is_none());
        assert_eq!(idx.get_path(&id("b")), Some(&path("sensors/bedroom/temperature")));
    }
}
