// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Duration strings with an optional sign.
//!
//! A negative timeout is meaningful (wait "indefinitely"), so timeouts are
//! parsed into a [`SignedDuration`]. The magnitude uses humantime syntax
//! such as `30s`, `5m` or `1h 30m`; a bare `0` is accepted without a unit.

use std::fmt;
use std::time::Duration;

use crate::error::{Result, WaiterError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedDuration {
    negative: bool,
    magnitude: Duration,
}

impl SignedDuration {
    pub const ZERO: SignedDuration = SignedDuration {
        negative: false,
        magnitude: Duration::ZERO,
    };

    pub fn positive(magnitude: Duration) -> Self {
        Self {
            negative: false,
            magnitude,
        }
    }

    pub fn negative(magnitude: Duration) -> Self {
        Self {
            negative: !magnitude.is_zero(),
            magnitude,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    pub fn magnitude(&self) -> Duration {
        self.magnitude
    }
}

impl fmt::Display for SignedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", humantime::format_duration(self.magnitude))
    }
}

impl std::str::FromStr for SignedDuration {
    type Err = WaiterError;

    fn from_str(s: &str) -> Result<Self> {
        parse_signed_duration(s)
    }
}

/// Parse a duration string that may carry a leading `-` or `+`.
pub fn parse_signed_duration(input: &str) -> Result<SignedDuration> {
    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let magnitude = if unsigned == "0" {
        Duration::ZERO
    } else {
        humantime::parse_duration(unsigned)
            .map_err(|e| WaiterError::InvalidDuration(format!("'{}': {}", input, e)))?
    };

    Ok(if negative {
        SignedDuration::negative(magnitude)
    } else {
        SignedDuration::positive(magnitude)
    })
}

/// Parse a poll interval, which must not be negative.
pub fn parse_poll_interval(input: &str) -> Result<Duration> {
    let parsed = parse_signed_duration(input)?;
    if parsed.is_negative() {
        return Err(WaiterError::InvalidDuration(format!(
            "poll interval '{}' must not be negative",
            input
        )));
    }
    Ok(parsed.magnitude())
}
