// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Generic ULID-backed identifier
//!
//! `GenericId<T>` is a phantom-typed wrapper around a ULID so that ids for
//! different entities (formations, calls) are distinct types at compile time
//! even though they share the same underlying representation and codec.
//! ULIDs are lexicographically sortable by creation time, which is useful for
//! `FormationId` (ordering timer creation) and `CallId` (ordering call traces
//! in logs without a separate sequence counter).
//!
//! Channel ids are NOT built on this type: channels are identified by a
//! user-supplied stable string (see [`crate::value_objects::channel_id`]),
//! not a generated ULID.

use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use ulid::Ulid;

/// Associates a `GenericId<T>` with a human-readable category name, used in
/// error messages and `Display` formatting. Implemented by zero-sized marker
/// types (e.g. `FormationMarker`, `CallMarker`).
pub trait IdCategory {
    /// Short, lowercase category name (e.g. `"formation"`, `"call"`).
    fn category_name() -> &'static str;
}

/// A ULID wrapped with a phantom marker type so that, for example,
/// `GenericId<FormationMarker>` and `GenericId<CallMarker>` cannot be
/// accidentally interchanged despite sharing a representation.
pub struct GenericId<T: IdCategory> {
    id: Ulid,
    _marker: PhantomData<T>,
}

impl<T: IdCategory> GenericId<T> {
    /// Generates a new id from the current time.
    pub fn new() -> Self {
        Self { id: Ulid::new(), _marker: PhantomData }
    }

    /// Wraps an existing ULID.
    pub fn from_ulid(id: Ulid) -> Self {
        Self { id, _marker: PhantomData }
    }

    /// Parses an id from its canonical ULID string form.
    pub fn from_string(s: &str) -> Result<Self, ulid::DecodeError> {
        Ulid::from_string(s).map(Self::from_ulid)
    }

    /// Returns the underlying ULID.
    pub fn as_ulid(&self) -> Ulid {
        self.id
    }

    /// Milliseconds since the Unix epoch encoded in this id's timestamp
    /// component.
    pub fn timestamp_ms(&self) -> u64 {
        self.id.timestamp_ms()
    }

    /// The id's creation time as a UTC [`chrono::DateTime`], for logging and
    /// diagnostics.
    pub fn datetime(&self) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::from_timestamp_millis(self.timestamp_ms() as i64).unwrap_or_default()
    }
}

impl<T: IdCategory> Default for GenericId<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IdCategory> Clone for GenericId<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: IdCategory> Copy for GenericId<T> {}

impl<T: IdCategory> PartialEq for GenericId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl<T: IdCategory> Eq for GenericId<T> {}

impl<T: IdCategory> std::hash::Hash for GenericId<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T: IdCategory> PartialOrd for GenericId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: IdCategory> Ord for GenericId<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl<T: IdCategory> fmt::Debug for GenericId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Id({})", T::category_name(), self.id)
    }
}

impl<T: IdCategory> fmt::Display for GenericId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T: IdCategory> FromStr for GenericId<T> {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl<T: IdCategory> From<Ulid> for GenericId<T> {
    fn from(id: Ulid) -> Self {
        Self::from_ulid(id)
    }
}

// Serialized as a plain ULID string, matching the wire shape of every other
// identifier in the response envelope.
impl<T: IdCategory> Serialize for GenericId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id.to_string())
    }
}

impl<'de, T: IdCategory> Deserialize<'de> for GenericId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_string(&s).map_err(DeError::custom)
    }
}
