// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes plumbing: kind discovery, the dynamic object store, and mutations.

pub mod discovery;
pub mod objects;
pub mod store;

pub use discovery::resolve_kind;
pub use objects::{apply_object, delete_object};
pub use store::KubeObjectStore;
