// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Pipeline `Stage`
//!
//! A channel's processing pipeline (spec §4.2/§9) is a fixed, ordered list of
//! `Stage` variants resolved once at compile time from the channel's config —
//! there is no runtime reflection or dynamic dispatch on field names, only on
//! the stage's own function reference. `required`/`schema`/`condition`/
//! `selector`/`transform`/`detectChanges` each become exactly one `Stage`
//! variant in the compiled pipeline, in the fixed order fixed by
//! [`crate::services::compiler`].

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A schema validator: returns `Ok(())` if `payload` is acceptable, or an
/// `Err` describing why not.
pub type SchemaFn = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;
/// A guard predicate: `true` lets the payload continue through the pipeline.
pub type ConditionFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
/// Projects a payload down to the slice the handler actually cares about.
pub type SelectorFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;
/// Maps a payload to a new payload.
pub type TransformFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// One step of a channel's compiled pipeline.
#[derive(Clone)]
pub enum Stage {
    /// Rejects a `call()` carrying a `null`/missing payload.
    Required,
    /// Rejects a payload that fails the attached validator.
    Schema(SchemaFn),
    /// Rejects a payload that fails the attached predicate.
    Condition(ConditionFn),
    /// Projects the payload before it reaches later stages and the handler.
    Selector(SelectorFn),
    /// Maps the payload to a new value.
    Transform(TransformFn),
    /// Short-circuits the call if the (post-transform) payload is
    /// structurally equal to the channel's last stored payload.
    DetectChanges,
}

impl Stage {
    /// Short tag for logging; avoids printing closures.
    pub fn kind(&self) -> &'static str {
        match self {
            Stage::Required => "required",
            Stage::Schema(_) => "schema",
            Stage::Condition(_) => "condition",
            Stage::Selector(_) => "selector",
            Stage::Transform(_) => "transform",
            Stage::DetectChanges => "detect_changes",
        }
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Stage").field(&self.kind()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_match_variant() {
        assert_eq!(Stage::Required.kind(), "required");
        assert_eq!(Stage::DetectChanges.kind(), "detect_changes");
        let s = Stage::Condition(Arc::new(|_: &Value| true));
        assert_eq!(s.kind(), "condition");
    }
}
