// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use kube::Client;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kube_waiter::cli::{Cli, Command};
use kube_waiter::config::Config;
use kube_waiter::kubernetes::resolve_kind;
use kube_waiter::manifest::parse_manifests;
use kube_waiter::operations::{apply_and_wait, delete_and_wait, wait_for_object};
use kube_waiter::types::ObjectReference;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: field_manager={}, force_conflicts={}, timeout={}, poll_interval={}",
        config.field_manager,
        config.force_conflicts,
        config.timeout,
        humantime::format_duration(config.poll_interval)
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    // Ctrl-C cancels any wait in progress
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            trigger.cancel();
        }
    });

    match cli.command {
        Command::Apply {
            filename,
            namespace,
            wait,
        } => {
            let policy = wait.policy(&config)?;
            let manifest = tokio::fs::read_to_string(&filename)
                .await
                .with_context(|| format!("Failed to read {}", filename.display()))?;
            let objects = parse_manifests(&manifest)?;
            let applied = apply_and_wait(
                &client,
                &objects,
                namespace.as_deref(),
                &policy,
                &config,
                &cancel,
            )
            .await?;
            info!("Applied {} object(s)", applied.len());
        }
        Command::Delete {
            filename,
            namespace,
            wait,
            timing,
        } => {
            let policy = timing.policy(Vec::new(), &config)?;
            let manifest = tokio::fs::read_to_string(&filename)
                .await
                .with_context(|| format!("Failed to read {}", filename.display()))?;
            let objects = parse_manifests(&manifest)?;
            let deleted = delete_and_wait(
                &client,
                &objects,
                namespace.as_deref(),
                wait.then_some(&policy),
                &cancel,
            )
            .await?;
            info!("Deleted {} object(s)", deleted.len());
        }
        Command::Wait {
            api_version,
            kind,
            name,
            namespace,
            wait,
        } => {
            let policy = wait.policy(&config)?;
            let (resource, namespaced) = resolve_kind(&client, &api_version, &kind).await?;
            let namespace = namespaced
                .then(|| namespace.unwrap_or_else(|| client.default_namespace().to_string()));
            let reference = ObjectReference::new(&resource, namespace, name);
            wait_for_object(&client, &reference, &policy, &cancel).await?;
            info!("{} is ready", reference);
        }
    }

    Ok(())
}
