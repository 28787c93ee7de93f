// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! [`ObjectStore`] backed by the dynamic Kubernetes API

use async_trait::async_trait;
use kube::{api::DynamicObject, Api, Client};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::types::ObjectReference;
use crate::wait::ObjectStore;

/// Untyped `Api<DynamicObject>` for the referenced resource
pub fn dynamic_api(client: &Client, reference: &ObjectReference) -> Api<DynamicObject> {
    let resource = reference.api_resource();
    match &reference.namespace {
        Some(namespace) => Api::namespaced_with(client.clone(), namespace, &resource),
        None => Api::all_with(client.clone(), &resource),
    }
}

#[derive(Clone)]
pub struct KubeObjectStore {
    client: Client,
}

impl KubeObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for KubeObjectStore {
    #[instrument(skip(self, reference), fields(object = %reference))]
    async fn get(&self, reference: &ObjectReference) -> Result<Option<Value>, kube::Error> {
        match dynamic_api(&self.client, reference).get(&reference.name).await {
            Ok(object) => serde_json::to_value(object)
                .map(Some)
                .map_err(kube::Error::SerdeError),
            Err(kube::Error::Api(err)) if err.code == 404 => {
                debug!("Object {} not found", reference);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
