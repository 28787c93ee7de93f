// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::wait::{ConditionExpression, WaitPolicy};

#[derive(Parser, Debug)]
#[command(
    name = "kube-waiter",
    version,
    about = "Apply or delete Kubernetes objects and wait until they settle"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Server-side apply a manifest, then wait for conditions
    Apply {
        /// YAML manifest, may hold several documents
        #[arg(short = 'f', long)]
        filename: PathBuf,
        #[arg(short, long)]
        namespace: Option<String>,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Delete the objects of a manifest, optionally waiting until they are gone
    Delete {
        #[arg(short = 'f', long)]
        filename: PathBuf,
        #[arg(short, long)]
        namespace: Option<String>,
        /// Wait until every object is gone
        #[arg(long)]
        wait: bool,
        #[command(flatten)]
        timing: TimingArgs,
    },
    /// Wait for conditions on an existing object
    Wait {
        #[arg(long)]
        api_version: String,
        #[arg(long)]
        kind: String,
        #[arg(long)]
        name: String,
        #[arg(short, long)]
        namespace: Option<String>,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct WaitArgs {
    /// Condition to wait for, `PATH` (present and non-empty) or `PATH=VALUE`
    #[arg(long = "for", value_name = "PATH[=VALUE]")]
    pub conditions: Vec<ConditionExpression>,
    #[command(flatten)]
    pub timing: TimingArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TimingArgs {
    /// 0 checks once, a negative value waits up to one week
    #[arg(long, allow_hyphen_values = true)]
    pub timeout: Option<String>,
    /// Must not be negative
    #[arg(long, allow_hyphen_values = true)]
    pub poll_interval: Option<String>,
}

impl TimingArgs {
    pub fn policy(
        &self,
        conditions: Vec<ConditionExpression>,
        config: &Config,
    ) -> Result<WaitPolicy> {
        WaitPolicy::from_settings(
            conditions,
            self.timeout.as_deref(),
            self.poll_interval.as_deref(),
            config,
        )
    }
}

impl WaitArgs {
    pub fn policy(&self, config: &Config) -> Result<WaitPolicy> {
        self.timing.policy(self.conditions.clone(), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wait::WaitTimeout;
    use std::time::Duration;

    #[test]
    fn test_parse_apply() {
        let cli = Cli::try_parse_from([
            "kube-waiter",
            "apply",
            "-f",
            "endpoint.yaml",
            "--for",
            "status.endpointStatus=InService",
            "--for",
            "status.ackResourceMetadata.arn",
            "--timeout",
            "-1s",
        ])
        .unwrap();

        let Command::Apply { filename, namespace, wait } = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(filename, PathBuf::from("endpoint.yaml"));
        assert_eq!(namespace, None);
        assert_eq!(wait.conditions.len(), 2);
        assert_eq!(wait.conditions[0].expected_value.as_deref(), Some("InService"));
        assert_eq!(wait.conditions[1].expected_value, None);

        let policy = wait.policy(&Config::default()).unwrap();
        assert_eq!(policy.timeout, WaitTimeout::OneWeek);
        assert_eq!(policy.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_parse_delete_with_wait() {
        let cli = Cli::try_parse_from([
            "kube-waiter",
            "delete",
            "-f",
            "endpoint.yaml",
            "-n",
            "ml",
            "--wait",
            "--timeout",
            "0",
            "--poll-interval",
            "2s",
        ])
        .unwrap();

        let Command::Delete { namespace, wait, timing, .. } = cli.command else {
            panic!("expected delete");
        };
        assert_eq!(namespace.as_deref(), Some("ml"));
        assert!(wait);
        let policy = timing.policy(Vec::new(), &Config::default()).unwrap();
        assert_eq!(policy.timeout, WaitTimeout::CheckOnce);
        assert_eq!(policy.poll_interval, Duration::from_secs(2));
    }

    #[test]
    fn test_negative_poll_interval_reaches_policy_validation() {
        let cli = Cli::try_parse_from([
            "kube-waiter",
            "delete",
            "-f",
            "endpoint.yaml",
            "--wait",
            "--poll-interval",
            "-5s",
        ])
        .unwrap();

        let Command::Delete { timing, .. } = cli.command else {
            panic!("expected delete");
        };
        assert_eq!(timing.poll_interval.as_deref(), Some("-5s"));
        let err = timing.policy(Vec::new(), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("must not be negative"));
    }

    #[test]
    fn test_invalid_condition_is_rejected() {
        let result = Cli::try_parse_from([
            "kube-waiter",
            "wait",
            "--api-version",
            "v1",
            "--kind",
            "Pod",
            "--name",
            "web",
            "--for",
            "items[*].name",
        ]);
        assert!(result.is_err());
    }
}
