// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use crate::config::Config;
use crate::constants::wait::ONE_WEEK;
use crate::error::Result;
use crate::wait::condition::ConditionExpression;
use crate::wait::duration::{parse_poll_interval, parse_signed_duration, SignedDuration};

/// Normalized form of a configured timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitTimeout {
    /// Configured as zero: check exactly once, never sleep
    CheckOnce,
    /// Configured as negative: bounded by one week instead of forever
    OneWeek,
    Within(Duration),
}

impl WaitTimeout {
    pub fn effective(&self) -> Duration {
        match self {
            WaitTimeout::CheckOnce => Duration::ZERO,
            WaitTimeout::OneWeek => ONE_WEEK,
            WaitTimeout::Within(timeout) => *timeout,
        }
    }
}

impl From<SignedDuration> for WaitTimeout {
    fn from(configured: SignedDuration) -> Self {
        if configured.is_zero() {
            WaitTimeout::CheckOnce
        } else if configured.is_negative() {
            WaitTimeout::OneWeek
        } else {
            WaitTimeout::Within(configured.magnitude())
        }
    }
}

/// How one operation waits after its mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Conditions that must all hold; unused by the delete path
    pub conditions: Vec<ConditionExpression>,
    pub timeout: WaitTimeout,
    pub poll_interval: Duration,
}

impl WaitPolicy {
    pub fn new(
        conditions: Vec<ConditionExpression>,
        timeout: SignedDuration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            conditions,
            timeout: timeout.into(),
            poll_interval,
        }
    }

    /// Policy for a delete wait: no conditions, only absence.
    pub fn for_delete(timeout: SignedDuration, poll_interval: Duration) -> Self {
        Self::new(Vec::new(), timeout, poll_interval)
    }

    /// Build a policy from per-operation settings, falling back to the
    /// defaults in `config` for anything left unset.
    pub fn from_settings(
        conditions: Vec<ConditionExpression>,
        timeout: Option<&str>,
        poll_interval: Option<&str>,
        config: &Config,
    ) -> Result<Self> {
        let timeout = match timeout {
            Some(t) => parse_signed_duration(t)?,
            None => config.timeout,
        };
        let poll_interval = match poll_interval {
            Some(p) => parse_poll_interval(p)?,
            None => config.poll_interval,
        };
        Ok(Self::new(conditions, timeout, poll_interval))
    }
}
