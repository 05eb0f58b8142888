// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! End-to-end scenarios exercised through the public `Runtime` surface,
//! matching the concrete walkthroughs a reactive action bus needs to get
//! right: a plain handler round trip, throttle rejection, debounce
//! latest-wins, pipeline stage ordering, scheduled repeats, and a
//! registration-time cross-rule block.

use cyre::{ChannelConfig, Runtime};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn fast_path_increments_and_records_history() {
    let runtime = Runtime::default();
    let id = runtime.action(ChannelConfig { id: "ping".into(), ..Default::default() }).unwrap().id;
    runtime
        .on(&id, |payload: Value| async move {
            let n = payload.as_i64().unwrap();
            Ok(json!(n + 1))
        })
        .unwrap();

    let response = runtime.call(&id, json!(41)).await;
    assert!(response.ok);
    assert_eq!(response.payload, json!(42));
    assert_eq!(runtime.latest_payload(&id), Some(json!(42)));
}

#[tokio::test]
async fn throttle_rejects_within_window_then_admits_after() {
    let runtime = Runtime::default();
    let id = runtime.action(ChannelConfig { id: "t".into(), throttle_ms: Some(100), ..Default::default() }).unwrap().id;
    runtime.on(&id, |_payload: Value| async move { Ok(json!(true)) }).unwrap();

    let first = runtime.call(&id, json!(1)).await;
    assert!(first.ok);

    tokio::time::sleep(Duration::from_millis(50)).await;
    let second = runtime.call(&id, json!(2)).await;
    assert!(!second.ok);
    let remaining = second.metadata.remaining_ms.expect("throttled response carries remaining_ms");
    assert!((30..=70).contains(&remaining), "remaining_ms was {remaining}, expected roughly 50");

    tokio::time::sleep(Duration::from_millis(60)).await;
    let third = runtime.call(&id, json!(3)).await;
    assert!(third.ok);
}

#[tokio::test]
async fn debounce_invokes_handler_once_with_latest_payload() {
    let runtime = Runtime::default();
    let id = runtime.action(ChannelConfig { id: "d".into(), debounce_ms: Some(50), ..Default::default() }).unwrap().id;

    let invocations: Arc<parking_lot::Mutex<Vec<String>>> = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let invocations_clone = invocations.clone();
    runtime
        .on(&id, move |payload: Value| {
            let invocations = invocations_clone.clone();
            async move {
                invocations.lock().push(payload.as_str().unwrap().to_string());
                Ok(payload)
            }
        })
        .unwrap();

    runtime.call(&id, json!("a")).await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    runtime.call(&id, json!("b")).await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    runtime.call(&id, json!("c")).await;

    tokio::time::sleep(Duration::from_millis(100)).await;

    let recorded = invocations.lock().clone();
    assert_eq!(recorded, vec!["c".to_string()]);
}

#[tokio::test]
async fn pipeline_runs_stages_in_declared_order_with_condition_and_change_detection() {
    let runtime = Runtime::default();
    let id = runtime
        .action(ChannelConfig {
            id: "pipe".into(),
            required: true,
            condition: Some(Arc::new(|payload: &Value| payload.as_i64().map(|n| n > 0).unwrap_or(false))),
            transform: Some(Arc::new(|payload: Value| json!(payload.as_i64().unwrap() * 2))),
            detect_changes: true,
            ..Default::default()
        })
        .unwrap()
        .id;

    let handler_calls = Arc::new(AtomicUsize::new(0));
    let handler_calls_clone = handler_calls.clone();
    runtime
        .on(&id, move |payload: Value| {
            let handler_calls = handler_calls_clone.clone();
            async move {
                handler_calls.fetch_add(1, Ordering::SeqCst);
                Ok(payload)
            }
        })
        .unwrap();

    let blocked = runtime.call(&id, json!(0)).await;
    assert!(!blocked.ok);
    assert_eq!(handler_calls.load(Ordering::SeqCst), 0);

    let first = runtime.call(&id, json!(3)).await;
    assert!(first.ok);
    assert_eq!(first.payload, json!(6));
    assert_eq!(handler_calls.load(Ordering::SeqCst), 1);

    let second = runtime.call(&id, json!(3)).await;
    assert!(second.ok);
    assert_eq!(handler_calls.load(Ordering::SeqCst), 1, "unchanged payload must short-circuit before the handler");
}

#[tokio::test]
async fn scheduled_channel_fires_exactly_repeat_times() {
    let runtime = Runtime::default();
    let id = runtime
        .action(ChannelConfig {
            id: "s".into(),
            delay_ms: Some(100),
            interval_ms: Some(50),
            repeat: Some(3),
            ..Default::default()
        })
        .unwrap()
        .id;

    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = count.clone();
    runtime
        .on(&id, move |payload: Value| {
            let count = count_clone.clone();
            async move {
                count.fetch_add(1, Ordering::SeqCst);
                Ok(payload)
            }
        })
        .unwrap();

    let scheduled = runtime.call(&id, Value::Null).await;
    assert!(scheduled.ok);
    assert!(scheduled.message.contains("scheduled"), "unexpected message: {}", scheduled.message);

    tokio::time::sleep(Duration::from_millis(130)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_millis(55)).await;
    assert_eq!(count.load(Ordering::SeqCst), 2);

    tokio::time::sleep(Duration::from_millis(55)).await;
    assert_eq!(count.load(Ordering::SeqCst), 3);

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(count.load(Ordering::SeqCst), 3, "formation must stop firing once repeat is exhausted");
}

#[tokio::test]
async fn interval_without_repeat_is_blocked_at_registration() {
    let runtime = Runtime::default();
    let outcome = runtime.action(ChannelConfig { id: "x".into(), interval_ms: Some(100), ..Default::default() }).unwrap();
    assert!(outcome.blocked);
    assert_eq!(outcome.block_reason.as_deref(), Some("interval requires repeat to be set"));

    // The channel is still stored, just visibly blocked — not "unknown".
    let channel = runtime.get(&outcome.id).expect("blocked registration is still stored");
    assert!(channel.flags.is_blocked);

    let response = runtime.call(&outcome.id, json!(1)).await;
    assert!(!response.ok);
    assert_eq!(response.message, "interval requires repeat to be set");
}
