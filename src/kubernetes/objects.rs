// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Server-side apply and delete through the dynamic client

use kube::{
    api::{DeleteParams, DynamicObject, Patch, PatchParams},
    Client,
};
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::kubernetes::store::dynamic_api;
use crate::types::ObjectReference;

/// Apply the object (create or update) with the configured field manager
#[instrument(skip(client, object, config), fields(object = %reference))]
pub async fn apply_object(
    client: &Client,
    reference: &ObjectReference,
    object: &DynamicObject,
    config: &Config,
) -> Result<DynamicObject> {
    let mut pp = PatchParams::apply(&config.field_manager);
    if config.force_conflicts {
        pp = pp.force();
    }

    let applied = dynamic_api(client, reference)
        .patch(&reference.name, &pp, &Patch::Apply(object))
        .await?;

    info!("Applied {}", reference);
    Ok(applied)
}

/// Delete the object. An object that is already gone counts as deleted.
#[instrument(skip(client), fields(object = %reference))]
pub async fn delete_object(client: &Client, reference: &ObjectReference) -> Result<()> {
    match dynamic_api(client, reference)
        .delete(&reference.name, &DeleteParams::default())
        .await
    {
        Ok(_) => {
            info!("Deleted {}", reference);
            Ok(())
        }
        Err(kube::Error::Api(err)) if err.code == 404 => {
            debug!("{} already deleted", reference);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
