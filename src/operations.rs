// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Mutations followed by their wait step.

use kube::{api::DynamicObject, Client, ResourceExt};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Config;
use crate::error::{Result, WaiterError};
use crate::kubernetes::{apply_object, delete_object, resolve_kind, KubeObjectStore};
use crate::types::ObjectReference;
use crate::wait::{wait_for_conditions, wait_for_deletion, WaitPolicy};

/// Resolve the reference for a manifest object.
///
/// Namespaced objects use their own namespace, then `namespace`, then the
/// client's default namespace. Cluster-scoped objects get none.
pub async fn resolve_reference(
    client: &Client,
    object: &DynamicObject,
    namespace: Option<&str>,
) -> Result<ObjectReference> {
    let types = object
        .types
        .as_ref()
        .ok_or_else(|| WaiterError::InvalidManifest("object has no apiVersion/kind".to_string()))?;
    let (resource, namespaced) = resolve_kind(client, &types.api_version, &types.kind).await?;

    let namespace = namespaced.then(|| {
        object
            .namespace()
            .or_else(|| namespace.map(str::to_string))
            .unwrap_or_else(|| client.default_namespace().to_string())
    });

    Ok(ObjectReference::new(&resource, namespace, object.name_any()))
}

/// Apply every object, then wait for the policy's conditions on each in order.
/// Without conditions the objects are applied and not waited on.
pub async fn apply_and_wait(
    client: &Client,
    objects: &[DynamicObject],
    namespace: Option<&str>,
    policy: &WaitPolicy,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<Vec<ObjectReference>> {
    let mut applied = Vec::with_capacity(objects.len());
    for object in objects {
        let reference = resolve_reference(client, object, namespace).await?;
        let mut object = object.clone();
        object.metadata.namespace = reference.namespace.clone();
        apply_object(client, &reference, &object, config).await?;
        applied.push(reference);
    }

    if policy.conditions.is_empty() {
        return Ok(applied);
    }

    let store = KubeObjectStore::new(client.clone());
    for reference in &applied {
        info!("Waiting for {} on {}", describe_conditions(policy), reference);
        wait_for_conditions(&store, reference, policy, cancel)
            .await?
            .into_result(reference, policy)?;
    }
    Ok(applied)
}

/// Delete every object, then optionally wait until each one is gone.
pub async fn delete_and_wait(
    client: &Client,
    objects: &[DynamicObject],
    namespace: Option<&str>,
    policy: Option<&WaitPolicy>,
    cancel: &CancellationToken,
) -> Result<Vec<ObjectReference>> {
    let mut deleted = Vec::with_capacity(objects.len());
    for object in objects {
        let reference = resolve_reference(client, object, namespace).await?;
        delete_object(client, &reference).await?;
        deleted.push(reference);
    }

    let Some(policy) = policy else {
        return Ok(deleted);
    };

    let store = KubeObjectStore::new(client.clone());
    for reference in &deleted {
        wait_for_deletion(&store, reference, policy, cancel)
            .await?
            .into_result(reference, policy)?;
    }
    Ok(deleted)
}

/// Wait on an existing object without mutating it.
pub async fn wait_for_object(
    client: &Client,
    reference: &ObjectReference,
    policy: &WaitPolicy,
    cancel: &CancellationToken,
) -> Result<()> {
    let store = KubeObjectStore::new(client.clone());
    wait_for_conditions(&store, reference, policy, cancel)
        .await?
        .into_result(reference, policy)
}

fn describe_conditions(policy: &WaitPolicy) -> String {
    policy
        .conditions
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
