// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Post-mutation poll loop.
//!
//! Polls are strictly sequential and every decision is made on a single
//! snapshot. The loop stops on success, on the deadline, on the first
//! transport error, or when the caller's cancellation token fires.

use serde_json::Value;
use tokio::time::{sleep, sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, WaiterError};
use crate::types::ObjectReference;
use crate::wait::condition::all_satisfied;
use crate::wait::policy::{WaitPolicy, WaitTimeout};
use crate::wait::store::ObjectStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Satisfied,
    TimedOut,
}

impl WaitOutcome {
    /// Turn a timeout into a user-facing error.
    pub fn into_result(self, reference: &ObjectReference, policy: &WaitPolicy) -> Result<()> {
        match self {
            WaitOutcome::Satisfied => Ok(()),
            WaitOutcome::TimedOut => Err(WaiterError::TimedOut {
                reference: reference.to_string(),
                timeout: policy.timeout.effective(),
            }),
        }
    }
}

/// Wait after a create or update until every condition in `policy` holds.
///
/// A missing object is not an error here, it simply does not satisfy the
/// conditions yet. With no conditions, existence alone is enough.
#[instrument(skip(store, reference, policy, cancel), fields(object = %reference))]
pub async fn wait_for_conditions<S>(
    store: &S,
    reference: &ObjectReference,
    policy: &WaitPolicy,
    cancel: &CancellationToken,
) -> Result<WaitOutcome>
where
    S: ObjectStore + ?Sized,
{
    let outcome = poll_until(store, reference, policy, cancel, |snapshot| match snapshot {
        Some(document) => all_satisfied(&policy.conditions, document),
        None => {
            debug!("Object not found yet");
            false
        }
    })
    .await?;

    match outcome {
        WaitOutcome::Satisfied => info!("Wait conditions satisfied"),
        WaitOutcome::TimedOut => warn!(
            "Wait conditions not met within {}",
            humantime::format_duration(policy.timeout.effective())
        ),
    }
    Ok(outcome)
}

/// Wait after a delete until the object is gone.
#[instrument(skip(store, reference, policy, cancel), fields(object = %reference))]
pub async fn wait_for_deletion<S>(
    store: &S,
    reference: &ObjectReference,
    policy: &WaitPolicy,
    cancel: &CancellationToken,
) -> Result<WaitOutcome>
where
    S: ObjectStore + ?Sized,
{
    let outcome =
        poll_until(store, reference, policy, cancel, |snapshot| snapshot.is_none()).await?;

    match outcome {
        WaitOutcome::Satisfied => info!("Object deleted"),
        WaitOutcome::TimedOut => warn!(
            "Object still present after {}",
            humantime::format_duration(policy.timeout.effective())
        ),
    }
    Ok(outcome)
}

async fn poll_until<S, F>(
    store: &S,
    reference: &ObjectReference,
    policy: &WaitPolicy,
    cancel: &CancellationToken,
    mut done: F,
) -> Result<WaitOutcome>
where
    S: ObjectStore + ?Sized,
    F: FnMut(Option<&Value>) -> bool,
{
    let deadline = Instant::now() + policy.timeout.effective();
    let check_once = policy.timeout == WaitTimeout::CheckOnce;
    let mut attempt: u64 = 0;

    loop {
        attempt = attempt.saturating_add(1);

        // A fetch still in flight at the deadline counts as a timeout,
        // except for the single check, which always gets its answer.
        let snapshot = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(WaiterError::Cancelled),
            fetched = store.get(reference) => fetched?,
            _ = sleep_until(deadline), if !check_once => {
                debug!(attempt, "Deadline reached while fetching");
                return Ok(WaitOutcome::TimedOut);
            }
        };

        if done(snapshot.as_ref()) {
            debug!(attempt, "Wait finished");
            return Ok(WaitOutcome::Satisfied);
        }

        let now = Instant::now();
        if check_once || now >= deadline {
            return Ok(WaitOutcome::TimedOut);
        }

        // The last poll happens at the deadline, never after it.
        let delay = policy
            .poll_interval
            .min(deadline.saturating_duration_since(now));
        debug!(
            attempt,
            "Not done yet, polling again in {}",
            humantime::format_duration(delay)
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(WaiterError::Cancelled),
            _ = sleep(delay) => {}
        }
    }
}
