// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `ChannelPath`
//!
//! Hierarchical, `/`-separated path attached to a channel for use with the
//! path index (exact lookup, prefix/depth queries, and `*`/`**` wildcard
//! matching). A path is a plain sequence of segments; wildcard segments are
//! only meaningful in a *match pattern*, not in a channel's own registered
//! path, so registration rejects `*` and `**` as channel path segments while
//! [`ChannelPath::matches_pattern`] accepts them on the pattern side.

use crate::error::CyreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated hierarchical path, e.g. `"sensors/kitchen/temperature"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelPath(String);

impl ChannelPath {
    /// Validates and wraps a channel's registered path.
    ///
    /// # Errors
    ///
    /// Returns [`CyreError::InvalidPath`] if the path is empty, starts or
    /// ends with `/`, contains an empty segment (`//`), contains a wildcard
    /// segment (`*` or `**`), or contains a segment with characters outside
    /// `[A-Za-z0-9_-]`.
    pub fn new(raw: impl Into<String>) -> Result<Self, CyreError> {
        let raw = raw.into();
        Self::validate(&raw)?;
        Ok(Self(raw))
    }

    fn validate(raw: &str) -> Result<(), CyreError> {
        if raw.is_empty() {
            return Err(CyreError::InvalidPath("path must not be empty".into()));
        }
        if raw.starts_with('/') || raw.ends_with('/') {
            return Err(CyreError::InvalidPath(format!("path '{raw}' must not start or end with '/'")));
        }
        for segment in raw.split('/') {
            if segment.is_empty() {
                return Err(CyreError::InvalidPath(format!("path '{raw}' contains an empty segment")));
            }
            if segment == "*" || segment == "**" {
                return Err(CyreError::InvalidPath(format!(
                    "path '{raw}' must not contain a wildcard segment"
                )));
            }
            if !segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
                return Err(CyreError::InvalidPath(format!(
                    "path segment '{segment}' must be alphanumeric, '_' or '-'"
                )));
            }
        }
        Ok(())
    }

    /// Returns `true` if `raw` would be accepted by [`ChannelPath::new`],
    /// without allocating. Used by the path index to validate patterns.
    pub fn is_valid_path(raw: &str) -> bool {
        Self::validate(raw).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the path into its `/`-delimited segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Number of segments (depth) in the path.
    pub fn depth(&self) -> usize {
        self.0.split('/').count()
    }

    /// Matches this path against a `*`/`**` wildcard pattern. `*` matches
    /// exactly one segment; `**` matches zero or more segments and may only
    /// appear once, as the final pattern segment (per spec §4.1).
    pub fn matches_pattern(&self, pattern: &str) -> bool {
        let path_segments: Vec<&str> = self.segments().collect();
        let pattern_segments: Vec<&str> = pattern.split('/').collect();

        let mut pi = 0usize;
        for (idx, pseg) in pattern_segments.iter().enumerate() {
            if *pseg == "**" {
                debug_assert_eq!(idx, pattern_segments.len() - 1, "** must be the final segment");
                return true;
            }
            let Some(actual) = path_segments.get(pi) else {
                return false;
            };
            if *pseg != "*" && *pseg != *actual {
                return false;
            }
            pi += 1;
        }
        pi == path_segments.len()
    }
}

impl fmt::Display for ChannelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_leading_and_trailing_slash() {
        assert!(ChannelPath::new("/a/b").is_err());
        assert!(ChannelPath::new("a/b/").is_err());
    }

    #[test]
    fn rejects_empty_segment() {
        assert!(ChannelPath::new("a//b").is_err());
    }

    #[test]
    fn rejects_wildcard_in_registration() {
        assert!(ChannelPath::new("a/*/b").is_err());
        assert!(ChannelPath::new("a/**").is_err());
    }

    #[test]
    fn single_star_matches_one_segment() {
        let p = ChannelPath::new("sensors/kitchen/temperature").unwrap();
        assert!(p.matches_pattern("sensors/*/temperature"));
        assert!(!p.matches_pattern("sensors/*"));
    }

    #[test]
    fn double_star_matches_remainder() {
        let p = ChannelPath::new("sensors/kitchen/temperature").unwrap();
        assert!(p.matches_pattern("sensors/**"));
        assert!(p.matches_pattern("**"));
    }

    #[test]
    fn exact_match_with_no_wildcards() {
        let p = ChannelPath::new("sensors/kitchen/temperature").unwrap();
        assert!(p.matches_pattern("sensors/kitchen/temperature"));
        assert!(!p.matches_pattern("sensors/kitchen/humidity"));
    }
}
