// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Change detection
//!
//! Backs the `Stage::DetectChanges` pipeline stage (spec §4.2/§9): a call
//! whose payload is structurally equal to the channel's last stored payload
//! is short-circuited before the handler runs. `serde_json::Value` already
//! implements deep structural `PartialEq` (field-order-independent for
//! objects, order-sensitive for arrays), so detection is a direct comparison
//! rather than a hand-rolled deep-equality routine.
//!
//! Per the resolved open question in spec §9, comparison uses the
//! *pre-transform* payload: `Transform` stages run before `DetectChanges` in
//! the compiled pipeline order, but the history entry recorded for the next
//! comparison is the value as it stood when the call arrived, not the
//! transformed value the handler eventually receives.

use serde_json::Value;

/// Returns `true` if `incoming` is unchanged relative to `previous`.
///
/// `previous == None` (no prior payload recorded) is never "unchanged" — the
/// first call on a channel always passes through.
pub fn is_unchanged(previous: Option<&Value>, incoming: &Value) -> bool {
    previous.is_some_and(|prev| prev == incoming)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_call_is_never_unchanged() {
        assert!(!is_unchanged(None, &json!({"a": 1})));
    }

    #[test]
    fn identical_payloads_are_unchanged() {
        let a = json!({"a": 1, "b": [1, 2, 3]});
        let b = json!({"a": 1, "b": [1, 2, 3]});
        assert!(is_unchanged(Some(&a), &b));
    }

    #[test]
    fn object_key_order_does_not_matter() {
        let a = json!({"a": 1, "b": 2});
        let b = json!({"b": 2, "a": 1});
        assert!(is_unchanged(Some(&a), &b));
    }

    #[test]
    fn array_order_matters() {
        let a = json!([1, 2, 3]);
        let b = json!([3, 2, 1]);
        assert!(!is_unchanged(Some(&a), &b));
    }

    #[test]
    fn differing_payloads_are_changed() {
        let a = json!({"a": 1});
        let b = json!({"a": 2});
        assert!(!is_unchanged(Some(&a), &b));
    }
}
