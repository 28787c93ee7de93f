// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Multi-document YAML manifests

use kube::api::DynamicObject;
use serde::Deserialize;

use crate::error::{Result, WaiterError};

/// Parse every non-empty YAML document into a dynamic object.
/// Each object must carry `apiVersion`, `kind` and `metadata.name`.
pub fn parse_manifests(input: &str) -> Result<Vec<DynamicObject>> {
    let mut objects = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_str(input).enumerate() {
        let value = serde_yaml::Value::deserialize(document)
            .map_err(|e| WaiterError::InvalidManifest(format!("document {}: {}", index, e)))?;
        if value.is_null() {
            continue;
        }

        let object: DynamicObject = serde_yaml::from_value(value)
            .map_err(|e| WaiterError::InvalidManifest(format!("document {}: {}", index, e)))?;

        if object.types.is_none() {
            return Err(WaiterError::InvalidManifest(format!(
                "document {} is missing apiVersion or kind",
                index
            )));
        }
        if object.metadata.name.as_deref().unwrap_or_default().is_empty() {
            return Err(WaiterError::InvalidManifest(format!(
                "document {} is missing metadata.name",
                index
            )));
        }

        objects.push(object);
    }

    Ok(objects)
}
