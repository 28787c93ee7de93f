// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::constants::{self, env as vars};
use crate::wait::duration::{parse_poll_interval, parse_signed_duration, SignedDuration};

/// Defaults loaded from environment variables, merged with per-operation settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Field manager for server-side apply
    pub field_manager: String,
    pub force_conflicts: bool,
    /// Timeout used when an operation does not configure one
    pub timeout: SignedDuration,
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            field_manager: constants::FIELD_MANAGER.to_string(),
            force_conflicts: true,
            timeout: SignedDuration::positive(constants::wait::DEFAULT_TIMEOUT),
            poll_interval: constants::wait::DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(field_manager) = lookup(vars::FIELD_MANAGER).filter(|v| !v.is_empty()) {
            config.field_manager = field_manager;
        }
        if let Some(force) = lookup(vars::FORCE_CONFLICTS) {
            config.force_conflicts = force
                .parse::<bool>()
                .with_context(|| format!("{} must be true or false", vars::FORCE_CONFLICTS))?;
        }
        if let Some(timeout) = lookup(vars::TIMEOUT) {
            config.timeout = parse_signed_duration(&timeout)
                .with_context(|| format!("{} is not a valid duration", vars::TIMEOUT))?;
        }
        if let Some(interval) = lookup(vars::POLL_INTERVAL) {
            config.poll_interval = parse_poll_interval(&interval)
                .with_context(|| format!("{} is not a valid duration", vars::POLL_INTERVAL))?;
        }

        Ok(config)
    }
}
