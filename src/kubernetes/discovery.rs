// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolve a manifest's `apiVersion` and `kind` to an API resource

use kube::{
    core::GroupVersionKind,
    discovery::{pinned_kind, ApiResource, Scope},
    Client,
};
use tracing::{debug, instrument};

use crate::error::{Result, WaiterError};

/// Split `group/version` into its parts; the core group has no prefix.
pub fn split_api_version(api_version: &str) -> (&str, &str) {
    api_version.rsplit_once('/').unwrap_or(("", api_version))
}

/// Discover the resource serving `kind`, and whether it is namespaced.
#[instrument(skip(client))]
pub async fn resolve_kind(
    client: &Client,
    api_version: &str,
    kind: &str,
) -> Result<(ApiResource, bool)> {
    let (group, version) = split_api_version(api_version);
    let gvk = GroupVersionKind::gvk(group, version, kind);

    let (resource, capabilities) = pinned_kind(client, &gvk).await.map_err(|e| {
        WaiterError::Discovery(format!("{} {} is not served: {}", api_version, kind, e))
    })?;
    let namespaced = matches!(capabilities.scope, Scope::Namespaced);

    debug!(
        "Resolved {} {} to {} (namespaced={})",
        api_version, kind, resource.plural, namespaced
    );
    Ok((resource, namespaced))
}
