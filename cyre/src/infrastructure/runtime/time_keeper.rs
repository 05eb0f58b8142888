// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `TimeKeeper`
//!
//! A single cooperative scheduler that owns every timer ("formation") in the
//! runtime: scheduled channel executions (`interval`/`delay`) and debounce
//! deferrals alike. Centralizing all timers here, rather than spawning an
//! independent `tokio::time::sleep` per caller, is what makes `pause`/
//! `resume`/`forget` possible as first-class operations instead of ad hoc
//! `AbortHandle` bookkeeping scattered across the call engine.
//!
//! ## Design Pattern: One Task Per Formation, One Registry
//!
//! Each formation runs as its own lightweight `tokio` task so that a slow
//! callback on one channel cannot delay another channel's schedule. The
//! registry only coordinates pause/cancel signaling and exposes read access
//! to formation snapshots (`get_active`, `get_all`) for diagnostics; it does
//! not itself drive any timer.
//!
//! **Why a tick-based wait instead of a single `sleep_until`?** `pause`
//! arrives asynchronously from a different task. Re-arming a bare
//! `tokio::time::sleep` mid-wait requires racing it against a cancellation
//! signal; `tokio::select!` against `Notify::notified()` gives us that race
//! for free and keeps `resume` a simple wake-up rather than a restart.

use cyre_domain::entities::{Formation, FormationStatus};
use cyre_domain::error::CyreError;
use cyre_domain::value_objects::{ChannelId, FormationId, Repeat};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

/// A formation's dispatch callback: invoked with the channel it belongs to
/// each time the formation fires.
pub type FormationCallback = Arc<dyn Fn(ChannelId) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

struct FormationControl {
    paused: AtomicBool,
    cancelled: AtomicBool,
    notify: Notify,
}

struct FormationHandle {
    state: Arc<Mutex<Formation>>,
    control: Arc<FormationControl>,
    task: JoinHandle<()>,
}

/// The runtime's single timer scheduler.
#[derive(Default)]
pub struct TimeKeeper {
    formations: Mutex<HashMap<FormationId, FormationHandle>>,
}

impl TimeKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a new formation for `channel_id`, firing `callback` after
    /// `delay_ms`, then every `interval_ms` (if set) until `repeat` is
    /// exhausted.
    #[instrument(skip(self, callback), fields(channel = %channel_id))]
    pub fn keep(
        &self,
        channel_id: ChannelId,
        delay_ms: u64,
        interval_ms: Option<u64>,
        repeat: Repeat,
        callback: FormationCallback,
    ) -> FormationId {
        let formation = Formation::new(channel_id.clone(), now_ms() + delay_ms, interval_ms, repeat);
        let id = formation.id;
        let state = Arc::new(Mutex::new(formation));
        let control =
            Arc::new(FormationControl { paused: AtomicBool::new(false), cancelled: AtomicBool::new(false), notify: Notify::new() });

        let task_state = state.clone();
        let task_control = control.clone();
        let task = tokio::spawn(Self::run(task_state, task_control, channel_id, callback));

        self.formations.lock().insert(id, FormationHandle { state, control, task });
        id
    }

    async fn run(state: Arc<Mutex<Formation>>, control: Arc<FormationControl>, channel_id: ChannelId, callback: FormationCallback) {
        loop {
            if control.cancelled.load(Ordering::Acquire) {
                return;
            }
            if control.paused.load(Ordering::Acquire) {
                control.notify.notified().await;
                continue;
            }

            let next_fire_at_ms = state.lock().next_fire_at_ms;
            let now = now_ms();
            if now < next_fire_at_ms {
                let wait = Duration::from_millis(next_fire_at_ms - now);
                tokio::select! {
                    _ = tokio::time::sleep(wait) => {}
                    _ = control.notify.notified() => { continue; }
                }
                continue;
            }

            if control.cancelled.load(Ordering::Acquire) {
                return;
            }
            debug!(channel = %channel_id, "formation fired");
            callback(channel_id.clone()).await;

            let done = {
                let mut guard = state.lock();
                guard.advance();
                guard.status == FormationStatus::Completed
            };
            if done {
                return;
            }
        }
    }

    /// Cancels and removes a formation. Returns `true` if it existed.
    pub fn forget(&self, id: &FormationId) -> bool {
        let Some(handle) = self.formations.lock().remove(id) else {
            return false;
        };
        handle.control.cancelled.store(true, Ordering::Release);
        handle.control.notify.notify_one();
        handle.task.abort();
        true
    }

    /// Suspends a formation in place; its `next_fire_at_ms` is retained so
    /// `resume` continues the countdown rather than restarting it.
    pub fn pause(&self, id: &FormationId) -> bool {
        let formations = self.formations.lock();
        let Some(handle) = formations.get(id) else {
            return false;
        };
        handle.control.paused.store(true, Ordering::Release);
        true
    }

    pub fn resume(&self, id: &FormationId) -> bool {
        let formations = self.formations.lock();
        let Some(handle) = formations.get(id) else {
            return false;
        };
        handle.control.paused.store(false, Ordering::Release);
        handle.control.notify.notify_one();
        true
    }

    /// Awaits a formation's underlying task to completion (or cancellation),
    /// removing it from the registry. Intended for one-shot (`delay`, no
    /// `interval`) formations where the caller wants to block until the
    /// single dispatch has happened.
    pub async fn wait(&self, id: &FormationId) -> Result<(), CyreError> {
        let handle = self.formations.lock().remove(id);
        let Some(handle) = handle else {
            return Err(CyreError::SchedulerError(format!("no such formation: {id}")));
        };
        handle.task.await.map_err(|e| {
            warn!(error = %e, "formation task join failed");
            CyreError::SchedulerError(e.to_string())
        })
    }

    /// Snapshot of every formation whose status is
    /// [`FormationStatus::Active`].
    pub fn get_active(&self) -> Vec<Formation> {
        self.formations.lock().values().map(|h| h.state.lock().clone()).filter(|f| f.status == FormationStatus::Active).collect()
    }

    /// Snapshot of every formation currently registered, regardless of
    /// status.
    pub fn get_all(&self) -> Vec<Formation> {
        self.formations.lock().values().map(|h| h.state.lock().clone()).collect()
    }

    pub fn get_formation(&self, id: &FormationId) -> Option<Formation> {
        self.formations.lock().get(id).map(|h| h.state.lock().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn channel_id() -> ChannelId {
        ChannelId::new("test").unwrap()
    }

    #[tokio::test]
    async fn fires_once_after_delay() {
        let keeper = TimeKeeper::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let id = keeper.keep(
            channel_id(),
            10,
            None,
            Repeat::Once,
            Arc::new(move |_| {
                let count = count_clone.clone();
                Box::pin(async move {
                    count.fetch_add(1, Ordering::SeqCst);
                })
            }),
        );
        keeper.wait(&id).await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn forget_prevents_further_firing() {
        let keeper = TimeKeeper::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let id = keeper.keep(
            channel_id(),
            50,
            Some(10),
            Repeat::Forever,
            Arc::new(move |_| {
                let count = count_clone.clone();
                Box::pin(async move {
                    count.fetch_add(1, Ordering::SeqCst);
                })
            }),
        );
        assert!(keeper.forget(&id));
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn pause_then_resume_eventually_fires() {
        let keeper = TimeKeeper::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let id = keeper.keep(
            channel_id(),
            20,
            None,
            Repeat::Once,
            Arc::new(move |_| {
                let count = count_clone.clone();
                Box::pin(async move {
                    count.fetch_add(1, Ordering::SeqCst);
                })
            }),
        );
        assert!(keeper.pause(&id));
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(keeper.resume(&id));
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
