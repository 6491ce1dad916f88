//! Shared fixtures for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use studyhub::session::{TOKEN_KEY, USERNAME_KEY};
use studyhub::{
    ApiClient, ApiRequest, App, KeyValueStore, MemoryStore, Method, RawResponse, Transport,
    TransportError,
};

pub const BASE: &str = "http://studyhub.test/api";
pub const ALERT_TIMEOUT: Duration = Duration::from_millis(4000);

type Handler = dyn Fn(&ApiRequest) -> Result<RawResponse, TransportError> + Send + Sync;

/// In-memory backend: answers through a handler and records every request
#[derive(Clone)]
pub struct FakeBackend {
    log: Arc<Mutex<Vec<ApiRequest>>>,
    handler: Arc<Handler>,
}

impl FakeBackend {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&ApiRequest) -> Result<RawResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            handler: Arc::new(handler),
        }
    }

    /// Backend serving the standard fixture data
    pub fn standard() -> Self {
        Self::new(standard_routes)
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().unwrap().clone()
    }

    /// Requests sent to `path` (relative to [`BASE`]) with `method`
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && path_of(r) == path)
            .count()
    }

    pub fn clear(&self) {
        self.log.lock().unwrap().clear();
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let reply = (self.handler)(&request);
        self.log.lock().unwrap().push(request);
        reply
    }
}

pub fn path_of(request: &ApiRequest) -> &str {
    request.url.strip_prefix(BASE).unwrap_or(&request.url)
}

pub fn reply(status: u16, body: Value) -> Result<RawResponse, TransportError> {
    Ok(RawResponse::new(status, body.to_string()))
}

pub fn group_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "Weekly problem sets",
        "created_by_username": "ana",
        "members": ["ana", 7],
        "subjects": [{"id": 1, "name": "Linear Algebra"}],
        "resources": [{"id": 3, "title": "Notes", "link": "https://notes.test", "uploaded_by_username": "ana"}],
    })
}

pub fn standard_routes(request: &ApiRequest) -> Result<RawResponse, TransportError> {
    match (request.method, path_of(request)) {
        (Method::Post, "/login/") => reply(200, json!({"token": "abc123", "username": "ana"})),
        (Method::Post, "/register/") => reply(201, json!({"id": 9, "username": "ben"})),
        (Method::Post, "/logout/") => reply(204, Value::Null),
        (Method::Get, "/subjects/") => {
            reply(200, json!([{"id": 1, "name": "Linear Algebra"}, {"id": 2, "name": "Rust"}]))
        }
        (Method::Get, "/groups/") => reply(
            200,
            json!({"count": 2, "results": [group_json(5, "Algebra Circle"), group_json(6, "Rustaceans")]}),
        ),
        (Method::Post, "/groups/") => reply(201, group_json(8, "New Group")),
        (Method::Get, "/groups/5/") => reply(200, group_json(5, "Algebra Circle")),
        (Method::Post, "/groups/5/join/") | (Method::Post, "/groups/5/leave/") => {
            reply(200, json!({"status": "ok"}))
        }
        (Method::Get, "/resources/") => reply(
            200,
            json!([{"id": 3, "title": "Notes", "link": "https://notes.test", "group": 5, "uploaded_by_username": "ana"}]),
        ),
        (Method::Post, "/resources/") => reply(
            201,
            json!({"id": 4, "title": "Slides", "link": "https://slides.test", "group": 5, "uploaded_by_username": "ana"}),
        ),
        (Method::Get, "/matches/") => reply(
            200,
            json!([{"user_id": 7, "username": "ben", "subjects": [{"id": 1, "name": "Linear Algebra"}]}]),
        ),
        _ => reply(404, json!({"detail": "Not found."})),
    }
}

pub fn app(backend: &FakeBackend, store: MemoryStore) -> App<FakeBackend, MemoryStore> {
    App::new(ApiClient::new(BASE, backend.clone()), store, ALERT_TIMEOUT)
}

/// Store holding a persisted session for "ana"
pub fn signed_in_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.set(TOKEN_KEY, "abc123").unwrap();
    store.set(USERNAME_KEY, "ana").unwrap();
    store
}
