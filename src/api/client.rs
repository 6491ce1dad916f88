//! HTTP API Client
//!
//! Typed calls against the StudyHub REST API.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{ClientError, ClientResult, ResponseBody};
use super::transport::{ApiRequest, Method, Transport};
use crate::forms::{Credentials, NewGroup, NewResource, Registration};
use crate::models::{normalize_collection, Group, Match, Resource, Subject};
use crate::session::Session;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

/// REST client carrying the current auth token.
///
/// No retries and no timeout: a request either resolves or fails once.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    base_url: String,
    token: Option<String>,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: None,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn build_request(&self, method: Method, path: &str, body: Option<String>) -> ApiRequest {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = &self.token {
            headers.push(("Authorization".to_string(), format!("Token {}", token)));
        }

        ApiRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers,
            body,
        }
    }

    /// Issue a request and parse the body.
    ///
    /// Non-success statuses fail with [`ClientError::Api`] carrying the
    /// parsed body.
    pub async fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<ResponseBody>
    where
        B: Serialize + ?Sized,
    {
        let body = body.map(serde_json::to_string).transpose()?;
        let request = self.build_request(method, path, body);

        tracing::debug!(method = %method, url = %request.url, "API request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(method = %method, path, error = %e, "API request failed");
            ClientError::Network(e)
        })?;

        let body = ResponseBody::parse(&response.body);
        if !response.is_success() {
            tracing::warn!(method = %method, path, status = response.status, "API error response");
            return Err(ClientError::Api {
                status: response.status,
                body,
            });
        }

        Ok(body)
    }

    async fn send_json<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self.request(method, path, body).await?;
        Ok(serde_json::from_value(body.into_value())?)
    }

    async fn get_collection<R: DeserializeOwned>(&self, path: &str) -> ClientResult<Vec<R>> {
        let body = self.request::<()>(Method::Get, path, None).await?;
        Ok(normalize_collection(body.into_value())?)
    }

    async fn post_empty(&self, path: &str) -> ClientResult<ResponseBody> {
        self.request::<()>(Method::Post, path, None).await
    }

    // ============ Auth ============

    pub async fn login(&self, credentials: &Credentials) -> ClientResult<Session> {
        self.send_json(Method::Post, "/login/", Some(credentials)).await
    }

    pub async fn register(&self, registration: &Registration) -> ClientResult<ResponseBody> {
        self.request(Method::Post, "/register/", Some(registration)).await
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.post_empty("/logout/").await.map(|_| ())
    }

    // ============ Groups ============

    /// List groups, optionally only those covering a subject
    pub async fn list_groups(&self, subject: Option<u64>) -> ClientResult<Vec<Group>> {
        let path = match subject {
            Some(id) => format!("/groups/?subjects={}", id),
            None => "/groups/".to_string(),
        };
        self.get_collection(&path).await
    }

    /// Any 2xx counts as created, whatever the body looks like
    pub async fn create_group(&self, group: &NewGroup) -> ClientResult<ResponseBody> {
        self.request(Method::Post, "/groups/", Some(group)).await
    }

    pub async fn get_group(&self, id: u64) -> ClientResult<Group> {
        self.send_json::<(), _>(Method::Get, &format!("/groups/{}/", id), None)
            .await
    }

    pub async fn join_group(&self, id: u64) -> ClientResult<ResponseBody> {
        self.post_empty(&format!("/groups/{}/join/", id)).await
    }

    pub async fn leave_group(&self, id: u64) -> ClientResult<ResponseBody> {
        self.post_empty(&format!("/groups/{}/leave/", id)).await
    }

    // ============ Subjects, Resources, Matches ============

    pub async fn list_subjects(&self) -> ClientResult<Vec<Subject>> {
        self.get_collection("/subjects/").await
    }

    /// List resources, optionally only those of one group
    pub async fn list_resources(&self, group: Option<u64>) -> ClientResult<Vec<Resource>> {
        let path = match group {
            Some(id) => format!("/resources/?group={}", id),
            None => "/resources/".to_string(),
        };
        self.get_collection(&path).await
    }

    /// Any 2xx counts as shared, whatever the body looks like
    pub async fn create_resource(&self, resource: &NewResource) -> ClientResult<ResponseBody> {
        self.request(Method::Post, "/resources/", Some(resource)).await
    }

    pub async fn list_matches(&self) -> ClientResult<Vec<Match>> {
        self.get_collection("/matches/").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::{RawResponse, TransportError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies with a fixed response and remembers the last request
    struct FixedTransport {
        reply: Result<RawResponse, TransportError>,
        last: Mutex<Option<ApiRequest>>,
    }

    impl FixedTransport {
        fn new(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(RawResponse::new(status, body)),
                last: Mutex::new(None),
            }
        }

        fn last(&self) -> ApiRequest {
            self.last.lock().unwrap().clone().expect("no request sent")
        }
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
            *self.last.lock().unwrap() = Some(request);
            self.reply.clone()
        }
    }

    #[tokio::test]
    async fn test_auth_header_only_with_token() {
        let mut client = ApiClient::new("http://api.test/api/", FixedTransport::new(200, "[]"));
        client.list_subjects().await.unwrap();

        let request = client.transport().last();
        assert_eq!(request.url, "http://api.test/api/subjects/");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("Authorization"), None);

        client.set_token(Some("abc123".into()));
        client.list_subjects().await.unwrap();
        assert_eq!(client.transport().last().header("Authorization"), Some("Token abc123"));
    }

    #[tokio::test]
    async fn test_error_status_carries_parsed_body() {
        let client = ApiClient::new(
            DEFAULT_API_BASE,
            FixedTransport::new(400, r#"{"error":"Invalid credentials"}"#),
        );
        let creds = Credentials {
            username: "ana".into(),
            password: "wrong".into(),
        };

        let err = client.login(&creds).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.detail().as_deref(), Some("Invalid credentials"));

        let request = client.transport().last();
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"username":"ana","password":"wrong"}"#)
        );
    }

    #[tokio::test]
    async fn test_non_json_error_body_falls_back_to_text() {
        let client = ApiClient::new(DEFAULT_API_BASE, FixedTransport::new(502, "Bad Gateway"));
        let err = client.list_groups(None).await.unwrap_err();
        match err {
            ClientError::Api { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, ResponseBody::Text("Bad Gateway".into()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_network_failure() {
        let transport = FixedTransport {
            reply: Err(TransportError("connection refused".into())),
            last: Mutex::new(None),
        };
        let client = ApiClient::new(DEFAULT_API_BASE, transport);
        assert!(matches!(
            client.list_matches().await,
            Err(ClientError::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_filters_build_query_strings() {
        let client = ApiClient::new(DEFAULT_API_BASE, FixedTransport::new(200, r#"{"results":[]}"#));

        client.list_groups(Some(3)).await.unwrap();
        assert!(client.transport().last().url.ends_with("/groups/?subjects=3"));

        client.list_resources(Some(9)).await.unwrap();
        assert!(client.transport().last().url.ends_with("/resources/?group=9"));
    }

    #[tokio::test]
    async fn test_create_accepts_any_success_body() {
        let client = ApiClient::new(
            DEFAULT_API_BASE,
            FixedTransport::new(201, r#"{"message":"Group created"}"#),
        );
        let group = NewGroup {
            name: "Algebra Circle".into(),
            description: String::new(),
        };

        let body = client.create_group(&group).await.unwrap();
        assert_eq!(body.id(), None);
        assert!(client.transport().last().url.ends_with("/groups/"));
    }

    #[tokio::test]
    async fn test_empty_success_body() {
        let client = ApiClient::new(DEFAULT_API_BASE, FixedTransport::new(204, ""));
        assert_eq!(client.join_group(1).await.unwrap(), ResponseBody::Empty);
        assert!(client.transport().last().url.ends_with("/groups/1/join/"));
    }
}
