// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The field manager used for server-side apply unless overridden
pub const FIELD_MANAGER: &str = "kube-waiter";

/// Environment variables read by [`crate::config::Config::from_env`]
pub mod env {
    pub const FIELD_MANAGER: &str = "KUBE_WAITER_FIELD_MANAGER";
    pub const FORCE_CONFLICTS: &str = "KUBE_WAITER_FORCE_CONFLICTS";
    pub const TIMEOUT: &str = "KUBE_WAITER_TIMEOUT";
    pub const POLL_INTERVAL: &str = "KUBE_WAITER_POLL_INTERVAL";
}

/// Wait defaults
pub mod wait {
    use std::time::Duration;

    /// Timeout applied when the caller does not configure one
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    /// Delay between two polls when the caller does not configure one
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
    /// Upper bound substituted for a negative (unbounded) timeout
    pub const ONE_WEEK: Duration = Duration::from_secs(7 * 24 * 60 * 60);
}
