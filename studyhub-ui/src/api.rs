//! Browser Adapters
//!
//! `gloo-net` transport and `localStorage` store for the shared client core.

use async_trait::async_trait;
use gloo_net::http::{Method as HttpMethod, RequestBuilder};
use std::rc::Rc;

use studyhub::{
    ApiRequest, KeyValueStore, Method, RawResponse, StoreError, Transport, TransportError,
    DEFAULT_API_BASE,
};

/// localStorage key overriding the API base URL
pub const API_URL_KEY: &str = "studyhub_api_url";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    local_storage()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Fetch-based transport
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let method = match request.method {
            Method::Get => HttpMethod::GET,
            Method::Post => HttpMethod::POST,
        };

        let mut builder = RequestBuilder::new(&request.url).method(method);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let sent = match request.body {
            Some(body) => builder
                .body(body)
                .map_err(|e| TransportError(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        };
        let response = sent.map_err(|e| TransportError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(RawResponse::new(status, body))
    }
}

/// Cloneable handle over any transport, so signal state can hold the client
#[derive(Clone)]
pub struct SharedTransport(Rc<dyn Transport>);

impl SharedTransport {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self(Rc::new(transport))
    }
}

#[async_trait(?Send)]
impl Transport for SharedTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.0.send(request).await
    }
}

/// Browser `localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        local_storage()
            .ok_or_else(|| StoreError::Unavailable("localStorage".to_string()))?
            .set_item(key, value)
            .map_err(|_| StoreError::Unavailable(format!("cannot write {}", key)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        local_storage()
            .ok_or_else(|| StoreError::Unavailable("localStorage".to_string()))?
            .remove_item(key)
            .map_err(|_| StoreError::Unavailable(format!("cannot remove {}", key)))
    }
}
