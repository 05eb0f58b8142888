// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `Branch`
//!
//! A path-prefixing facade over [`Runtime`]: every channel registered
//! through a branch gets its `path` namespaced under the branch's prefix,
//! so a subsystem can register its own channels without coordinating ids
//! with the rest of the application (spec §4.1). `destroy()` tears down
//! every channel the branch ever registered in one call by matching the
//! prefix against the path index rather than tracking registrations itself.

use super::runtime::Runtime;
use cyre_domain::entities::CompiledChannel;
use cyre_domain::error::CyreError;
use cyre_domain::repositories::Handler;
use cyre_domain::services::ChannelConfig;
use cyre_domain::value_objects::{ActionOutcome, ChannelId, CyreResponse};
use serde_json::Value;

/// A namespaced view over a [`Runtime`].
#[derive(Clone)]
pub struct Branch {
    runtime: Runtime,
    prefix: String,
}

impl Branch {
    pub fn new(runtime: Runtime, prefix: impl Into<String>) -> Self {
        Self { runtime, prefix: prefix.into() }
    }

    /// Registers `config` with its `path` (if any) namespaced under this
    /// branch's prefix. A config with no path is registered as-is; it is
    /// reachable by id but won't be swept up by [`Branch::destroy`].
    pub fn action(&self, mut config: ChannelConfig) -> Result<ActionOutcome, CyreError> {
        config.path = config.path.map(|p| format!("{}/{p}", self.prefix));
        self.runtime.action(config)
    }

    pub fn on<H>(&self, channel_id: &ChannelId, handler: H) -> Result<(), CyreError>
    where
        H: Handler + 'static,
    {
        self.runtime.on(channel_id, handler)
    }

    pub async fn call(&self, channel_id: &ChannelId, payload: Value) -> CyreResponse {
        self.runtime.call(channel_id, payload).await
    }

    pub fn get(&self, channel_id: &ChannelId) -> Option<CompiledChannel> {
        self.runtime.get(channel_id)
    }

    pub fn latest_payload(&self, channel_id: &ChannelId) -> Option<Value> {
        self.runtime.latest_payload(channel_id)
    }

    /// Derives a nested branch scoped under `self.prefix/segment`.
    pub fn branch(&self, segment: impl AsRef<str>) -> Branch {
        Branch::new(self.runtime.clone(), format!("{}/{}", self.prefix, segment.as_ref()))
    }

    /// Forgets every channel registered with a path under this branch's
    /// prefix.
    pub fn destroy(&self) {
        let pattern = format!("{}/**", self.prefix);
        for channel_id in self.runtime.match_path(&pattern) {
            self.runtime.forget(&channel_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn destroy_forgets_every_channel_under_prefix() {
        let runtime = Runtime::default();
        let branch = Branch::new(runtime.clone(), "sensors");

        let kitchen = branch
            .action(ChannelConfig { id: "kitchen-temp".into(), path: Some("kitchen/temp".into()), ..Default::default() })
            .unwrap()
            .id;
        let hall = branch
            .action(ChannelConfig { id: "hall-temp".into(), path: Some("hall/temp".into()), ..Default::default() })
            .unwrap()
            .id;
        branch.on(&kitchen, |p: Value| async move { Ok(p) }).unwrap();
        branch.on(&hall, |p: Value| async move { Ok(p) }).unwrap();

        branch.call(&kitchen, json!(21)).await;
        assert_eq!(branch.latest_payload(&kitchen), Some(json!(21)));

        branch.destroy();
        assert!(runtime.get(&kitchen).is_none());
        assert!(runtime.get(&hall).is_none());
    }
}
