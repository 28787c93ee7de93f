// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking the Kubernetes API and the object store.

use async_trait::async_trait;
use http::{Request, Response};
use kube::client::Body;
use kube::discovery::ApiResource;
use kube::Client;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::Instant;
use tower::Service;

use crate::types::ObjectReference;
use crate::wait::ObjectStore;

type Responses = HashMap<(String, String), VecDeque<(u16, String)>>;

/// A mock HTTP service that returns predefined responses based on request paths.
///
/// Several responses registered for the same method and path are returned in
/// order; the last one keeps being returned once the others are used up.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<Responses>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PATCH", path, status, body)
    }

    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    /// Requests seen so far as `(method, path?query)`
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(&(method.to_string(), path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|pq| pq.to_string())
            .unwrap_or_else(|| path.clone());

        self.requests
            .lock()
            .unwrap()
            .push((method.clone(), path_and_query));
        let response = self.find_response(&method, &path);

        Box::pin(async move {
            let (status, body) =
                response.unwrap_or_else(|| (404, not_found_json("object", "unknown")));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// Create a failure status response with the given code
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

pub fn endpoint_resource() -> ApiResource {
    ApiResource {
        group: "sagemaker.services.k8s.aws".to_string(),
        version: "v1alpha1".to_string(),
        api_version: "sagemaker.services.k8s.aws/v1alpha1".to_string(),
        kind: "Endpoint".to_string(),
        plural: "endpoints".to_string(),
    }
}

pub fn endpoint_reference() -> ObjectReference {
    ObjectReference::new(&endpoint_resource(), Some("ml".to_string()), "my-endpoint")
}

pub const ENDPOINT_PATH: &str =
    "/apis/sagemaker.services.k8s.aws/v1alpha1/namespaces/ml/endpoints/my-endpoint";

/// JSON for an Endpoint object with the given status
pub fn endpoint_json(status: Value) -> String {
    serde_json::json!({
        "apiVersion": "sagemaker.services.k8s.aws/v1alpha1",
        "kind": "Endpoint",
        "metadata": {
            "name": "my-endpoint",
            "namespace": "ml",
            "uid": "test-uid"
        },
        "spec": {"endpointName": "my-endpoint"},
        "status": status
    })
    .to_string()
}

/// One canned answer from an in-memory [`ObjectStore`]
#[derive(Debug, Clone)]
pub enum StoreResponse {
    Found(Value),
    Missing,
    Fail(&'static str),
}

impl StoreResponse {
    fn into_result(self) -> Result<Option<Value>, kube::Error> {
        match self {
            StoreResponse::Found(document) => Ok(Some(document)),
            StoreResponse::Missing => Ok(None),
            StoreResponse::Fail(message) => Err(kube::Error::Service(message.into())),
        }
    }
}

/// Store answering from a script, one entry per call.
/// The last entry repeats once the script is exhausted.
pub struct ScriptedStore {
    script: Mutex<VecDeque<StoreResponse>>,
    calls: AtomicUsize,
}

impl ScriptedStore {
    pub fn new(script: Vec<StoreResponse>) -> Self {
        assert!(!script.is_empty(), "script needs at least one response");
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for ScriptedStore {
    async fn get(&self, _reference: &ObjectReference) -> Result<Option<Value>, kube::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = {
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.pop_front()
            } else {
                script.front().cloned()
            }
        };
        response.unwrap_or(StoreResponse::Missing).into_result()
    }
}

/// Store whose answer changes once `switch_after` has elapsed since creation.
pub struct TimedStore {
    start: Instant,
    switch_after: Duration,
    before: StoreResponse,
    after: StoreResponse,
    calls: AtomicUsize,
}

impl TimedStore {
    pub fn new(switch_after: Duration, before: StoreResponse, after: StoreResponse) -> Self {
        Self {
            start: Instant::now(),
            switch_after,
            before,
            after,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for TimedStore {
    async fn get(&self, _reference: &ObjectReference) -> Result<Option<Value>, kube::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.start.elapsed() >= self.switch_after {
            self.after.clone().into_result()
        } else {
            self.before.clone().into_result()
        }
    }
}

/// Store that takes `delay` to answer every call.
pub struct SlowStore {
    delay: Duration,
    response: StoreResponse,
    calls: AtomicUsize,
}

impl SlowStore {
    pub fn new(delay: Duration, response: StoreResponse) -> Self {
        Self {
            delay,
            response,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for SlowStore {
    async fn get(&self, _reference: &ObjectReference) -> Result<Option<Value>, kube::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.response.clone().into_result()
    }
}
