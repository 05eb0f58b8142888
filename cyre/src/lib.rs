// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Cyre
//!
//! An in-process reactive action bus: register named channels with
//! `action()`, subscribe a handler with `on()`, and dispatch payloads to
//! them with `call()`. Channels can carry protections (throttle, debounce),
//! a processing pipeline (schema validation, conditions, selectors,
//! transforms, change detection), and scheduling (one-shot delay or
//! repeating interval) — all compiled once at registration time rather than
//! re-evaluated on every call.
//!
//! ## Architecture
//!
//! Cyre is split the way `cyre_domain` draws the boundary: a pure domain
//! crate with no I/O (value objects, entities, domain services, repository
//! ports) and this crate, which provides the application-layer
//! orchestration (`CallEngine`, `Runtime`, `Branch`) and the infrastructure
//! adapters that implement the domain's ports (in-memory channel/
//! subscription/payload stores, the `TimeKeeper` scheduler, the breathing
//! controller, logging, and metrics).
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              Application Layer               │
//! │   Runtime · Branch · CallEngine              │
//! └───────────────────────┬───────────────────────┘
//! ┌───────────────────────┴───────────────────────┐
//! │                Domain Layer                   │
//! │  (cyre_domain: entities, value objects,       │
//! │   services, repository ports)                 │
//! └───────────────────────┬───────────────────────┘
//! ┌───────────────────────┴───────────────────────┐
//! │             Infrastructure Layer               │
//! │  In-memory adapters · TimeKeeper · Breathing   │
//! │  controller · logging · metrics                │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```no_run
//! use cyre::Runtime;
//! use cyre_domain::services::ChannelConfig;
//! use serde_json::json;
//!
//! # async fn run() {
//! let runtime = Runtime::default();
//! let id = runtime
//!     .action(ChannelConfig { id: "greet".into(), ..Default::default() })
//!     .unwrap()
//!     .id;
//! runtime.on(&id, |payload| async move { Ok(payload) }).unwrap();
//!
//! let response = runtime.call(&id, json!({"name": "world"})).await;
//! assert!(response.ok);
//! # }
//! ```
//!
//! ## Call pipeline
//!
//! Every `call()` runs the same fixed sequence: look the channel up, short
//! circuit if it's blocked, take the fast path if nothing is configured,
//! otherwise run the bouncer (recuperation, throttle, debounce), the
//! compiled pipeline, scheduling hand-off, the handler, and finally payload
//! recording and metrics. See [`application::services::call_engine`] for the
//! full walkthrough.
//!
//! ## Adaptive pacing
//!
//! The breathing controller watches recent call intervals and derives a
//! stress estimate; under sustained load it scales throttle/debounce/
//! interval values up and, past a high watermark, rejects all but
//! `Critical`-priority calls until the system drains (spec §5.3). See
//! [`infrastructure::runtime::breathing`].

pub mod application;
pub mod infrastructure;

pub use application::{Branch, CallEngine, Runtime, RuntimeConfig};
pub use cyre_domain::entities::CompiledChannel;
pub use cyre_domain::error::CyreError;
pub use cyre_domain::repositories::Handler;
pub use cyre_domain::services::ChannelConfig;
pub use cyre_domain::value_objects::{ActionOutcome, ChannelId, CyreResponse};
