// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `ChannelId`
//!
//! Unlike [`crate::value_objects::formation_id::FormationId`] or
//! [`crate::value_objects::call_id::CallId`], a channel id is not generated —
//! it is supplied by the caller at registration time (`action({ id: "..." })`)
//! and must remain stable for the lifetime of the channel, since it is the
//! key every other subsystem (subscriptions, payload history, path index)
//! joins on.

use crate::error::CyreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated, immutable channel identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    /// Validates and wraps a caller-supplied channel id.
    ///
    /// # Errors
    ///
    /// Returns [`CyreError::InvalidConfiguration`] if `raw` is empty or
    /// contains whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, CyreError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(CyreError::InvalidConfiguration("channel id must not be empty".into()));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(CyreError::InvalidConfiguration(format!(
                "channel id '{raw}' must not contain whitespace"
            )));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ChannelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
