// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Condition-wait engine run after a mutation.

pub mod condition;
pub mod duration;
pub mod engine;
pub mod path;
pub mod policy;
pub mod store;

pub use condition::ConditionExpression;
pub use duration::SignedDuration;
pub use engine::{wait_for_conditions, wait_for_deletion, WaitOutcome};
pub use path::PathExpression;
pub use policy::{WaitPolicy, WaitTimeout};
pub use store::ObjectStore;
