// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use async_trait::async_trait;
use serde_json::Value;

use crate::types::ObjectReference;

/// Read access to the cluster, the only I/O the wait engine performs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the current state of the object. `Ok(None)` means not found,
    /// which is distinct from a transport failure.
    async fn get(&self, reference: &ObjectReference) -> Result<Option<Value>, kube::Error>;
}
