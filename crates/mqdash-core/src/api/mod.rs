//! API client: the request/response pipeline every backend call flows through.
//!
//! Explicit composition rather than registered hooks: each call is built,
//! passed through the request interceptor (bearer attach), dispatched, and
//! its response passed through the response interceptor (401 recovery)
//! before the caller sees the result.

pub mod auth;
pub mod devices;
pub mod mqtt;
pub mod sensors;
pub mod topics;

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::header;
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{StatusError, UnauthorizedError};
use crate::nav::Navigator;
use crate::session::SessionStore;

/// HTTP client for the device-management backend.
///
/// Owns the pipeline; callers never attach credentials or inspect
/// authorization failures themselves.
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
    session: Arc<SessionStore>,
    nav: Arc<Navigator>,
    token_auth: bool,
}

impl ApiClient {
    /// Creates a client from config plus the shared session and navigator.
    ///
    /// # Errors
    /// Returns an error if the base URL is malformed or the HTTP client
    /// cannot be built.
    pub fn new(config: &Config, session: Arc<SessionStore>, nav: Arc<Navigator>) -> Result<Self> {
        let base_url = Url::parse(&config.effective_base_url()?)
            .context("Invalid backend base URL")?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        if config.with_credentials {
            builder = builder.cookie_store(true);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url,
            http,
            session,
            nav,
            token_auth: config.enable_token_auth,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn nav(&self) -> &Arc<Navigator> {
        &self.nav
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Request interceptor: the bearer value to attach, if any.
    ///
    /// Absent token (or token auth disabled) means an unauthenticated call,
    /// which is valid; the login call itself is one.
    fn authorization_value(&self) -> Option<String> {
        if !self.token_auth {
            return None;
        }
        self.session.get().map(|token| format!("Bearer {token}"))
    }

    /// Sends one call through the full pipeline.
    async fn send(&self, method: Method, path: &str, body: Option<&serde_json::Value>) -> Result<Response> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Invalid request path: {path}"))?;

        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(bearer) = self.authorization_value() {
            request = request.header(header::AUTHORIZATION, bearer);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!("{} {}", method, url);
        let response = request
            .send()
            .await
            .with_context(|| format!("{method} {url} failed"))?;
        tracing::debug!("{} {} -> {}", method, url, response.status());

        self.inspect(response).await
    }

    /// Response interceptor: recover authorization failures, pass through
    /// everything else.
    ///
    /// On 401, in order: clear the credential store, force navigation to
    /// the login view, surface the original failure to the caller. Both
    /// recovery steps are idempotent, so late responses from calls already
    /// in flight at logout time are harmless.
    async fn inspect(&self, response: Response) -> Result<Response> {
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("authorization failure, clearing session");

        if let Err(e) = self.session.clear() {
            tracing::warn!("failed to clear stored session: {e:#}");
        }
        self.nav.force_login();

        Err(anyhow::Error::new(UnauthorizedError { status, body }))
    }

    /// Decodes a 2xx body as JSON; non-2xx becomes a `StatusError`.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::Error::new(StatusError {
                status: status.as_u16(),
                body,
            }));
        }

        response
            .json::<T>()
            .await
            .context("Failed to decode response body")
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path, None).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body).context("Failed to serialize request body")?;
        let response = self.send(Method::POST, path, Some(&body)).await?;
        Self::decode(response).await
    }

    /// POST without a body (activate/test style endpoints).
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::POST, path, None).await?;
        Self::decode(response).await
    }

    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body).context("Failed to serialize request body")?;
        let response = self.send(Method::PUT, path, Some(&body)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::DELETE, path, None).await?;
        Self::decode(response).await
    }
}

/// Acknowledgement body for delete/activate/test endpoints.
#[derive(Debug, serde::Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{RouteTable, ViewId};
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Harness {
        _temp: tempfile::TempDir,
        session: Arc<SessionStore>,
        nav: Arc<Navigator>,
        client: ApiClient,
    }

    fn harness(base_url: &str, token_auth: bool) -> Harness {
        let temp = tempfile::tempdir().unwrap();
        let session = Arc::new(SessionStore::at(temp.path().join("session.json")));
        let nav = Arc::new(Navigator::new(
            RouteTable::new(),
            Arc::clone(&session),
            token_auth,
        ));
        let config = Config {
            base_url: base_url.to_string(),
            with_credentials: false,
            enable_token_auth: token_auth,
            request_timeout_secs: 5,
        };
        let client = ApiClient::new(&config, Arc::clone(&session), Arc::clone(&nav)).unwrap();
        Harness {
            _temp: temp,
            session,
            nav,
            client,
        }
    }

    /// Test: a stored token is attached as "Bearer <token>" on every call.
    #[tokio::test]
    async fn test_attaches_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .and(header("authorization", "Bearer abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server.uri(), true);
        h.session.set("abc123").unwrap();

        let devices: Vec<serde_json::Value> = h.client.get_json("/api/devices").await.unwrap();
        assert!(devices.is_empty());
    }

    /// Test: with no token the call carries no Authorization header.
    #[tokio::test]
    async fn test_no_token_no_header() {
        let server = MockServer::start().await;
        // Reject any request that carries an Authorization header.
        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let h = harness(&server.uri(), true);
        let devices: Vec<serde_json::Value> = h.client.get_json("/api/devices").await.unwrap();
        assert!(devices.is_empty());
    }

    /// Test: token auth disabled attaches nothing even with a token stored.
    #[tokio::test]
    async fn test_disabled_token_auth_attaches_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let h = harness(&server.uri(), false);
        h.session.set("abc123").unwrap();

        let devices: Vec<serde_json::Value> = h.client.get_json("/api/devices").await.unwrap();
        assert!(devices.is_empty());
    }

    /// Test: a 401 clears the store, forces login, and surfaces the
    /// original failure to the caller.
    #[tokio::test]
    async fn test_unauthorized_recovery() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(serde_json::json!({
                    "detail": "token expired"
                })),
            )
            .mount(&server)
            .await;

        let h = harness(&server.uri(), true);
        h.session.set("xyz").unwrap();
        h.nav.navigate("/devices");

        let err = h
            .client
            .get_json::<Vec<serde_json::Value>>("/api/devices")
            .await
            .unwrap_err();

        let unauthorized = err.downcast_ref::<UnauthorizedError>().unwrap();
        assert_eq!(unauthorized.status, 401);
        assert!(unauthorized.body.contains("token expired"));
        assert_eq!(h.session.get(), None);
        assert_eq!(h.nav.current().view, ViewId::Login);
    }

    /// Test: running the recovery path twice equals running it once.
    #[tokio::test]
    async fn test_unauthorized_recovery_idempotent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let h = harness(&server.uri(), true);
        h.session.set("xyz").unwrap();

        for _ in 0..2 {
            let err = h
                .client
                .get_json::<Vec<serde_json::Value>>("/api/devices")
                .await
                .unwrap_err();
            assert!(err.downcast_ref::<UnauthorizedError>().is_some());
            assert_eq!(h.session.get(), None);
            assert_eq!(h.nav.current().view, ViewId::Login);
        }
    }

    /// Test: non-401 failures pass through and leave the session intact.
    #[tokio::test]
    async fn test_other_failures_pass_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let h = harness(&server.uri(), true);
        h.session.set("still-valid").unwrap();

        let err = h
            .client
            .get_json::<Vec<serde_json::Value>>("/api/devices")
            .await
            .unwrap_err();

        let status = err.downcast_ref::<StatusError>().unwrap();
        assert_eq!(status.status, 503);
        assert_eq!(status.body, "maintenance");
        assert_eq!(h.session.get(), Some("still-valid".to_string()));
    }
}
