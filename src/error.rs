// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaiterError {
    #[error("Kubernetes API error: {0}")]
    Transport(#[from] kube::Error),

    #[error(
        "operation succeeded; wait condition for {reference} not met within {}",
        format_timeout(.timeout)
    )]
    TimedOut { reference: String, timeout: Duration },

    #[error("Wait cancelled")]
    Cancelled,

    #[error("Invalid path expression: {0}")]
    InvalidPath(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Resource discovery failed: {0}")]
    Discovery(String),
}

fn format_timeout(timeout: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*timeout)
}

pub type Result<T> = std::result::Result<T, WaiterError>;
