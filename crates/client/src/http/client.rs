//! HTTP transport wrapper
//!
//! Single reqwest wrapper used by every remote operation: owns the base
//! URL, the fixed request timeout, auth injection, response unwrapping and
//! the global 401 side effect. Each operation attempts exactly once; there
//! is no retry, coalescing or cancellation here.

use std::sync::Arc;
use std::time::Duration;

use campus_domain::DEFAULT_TIMEOUT_SECS;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::error::TransportError;
use crate::auth::{SessionGuard, TokenProvider};

/// Header that skips the tunneling proxy's interstitial warning page
const TUNNEL_BYPASS_HEADER: &str = "ngrok-skip-browser-warning";

/// HTTP client with per-request auth injection and global 401 handling
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
    session: Arc<dyn SessionGuard>,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// GET a path and return the decoded body. An empty 2xx body decodes
    /// as JSON `null`; callers decide what that means for their operation.
    pub async fn get_value(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, TransportError> {
        let builder = self.request(Method::GET, path).query(query);
        let response = self.execute(builder).await?;
        read_json(response).await
    }

    /// POST a JSON body and return the decoded response body
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, TransportError> {
        let builder = self.request(Method::POST, path).json(body);
        let response = self.execute(builder).await?;
        read_json(response).await
    }

    /// POST with no body and return the decoded response body; used by
    /// relation endpoints that carry everything in the path
    pub async fn post_empty(&self, path: &str) -> Result<Value, TransportError> {
        let builder = self.request(Method::POST, path);
        let response = self.execute(builder).await?;
        read_json(response).await
    }

    /// PUT a JSON body and return the decoded response body
    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, TransportError> {
        let builder = self.request(Method::PUT, path).json(body);
        let response = self.execute(builder).await?;
        read_json(response).await
    }

    /// DELETE a path and return the decoded response body
    pub async fn delete(&self, path: &str) -> Result<Value, TransportError> {
        let builder = self.request(Method::DELETE, path);
        let response = self.execute(builder).await?;
        read_json(response).await
    }

    /// POST a multipart form and return the decoded response body.
    ///
    /// The form carries its own `multipart/form-data` content type; JSON
    /// headers are not applied here.
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<Value, TransportError> {
        let builder = self.request(Method::POST, path).multipart(form);
        let response = self.execute(builder).await?;
        read_json(response).await
    }

    /// PUT a multipart form and return the decoded response body
    pub async fn put_multipart(&self, path: &str, form: Form) -> Result<Value, TransportError> {
        let builder = self.request(Method::PUT, path).multipart(form);
        let response = self.execute(builder).await?;
        read_json(response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Send one request: inject the current token, surface non-2xx
    /// statuses as [`TransportError::Status`], and notify the session
    /// guard on 401 before returning the error to the caller.
    async fn execute(&self, builder: RequestBuilder) -> Result<Response, TransportError> {
        let mut builder = builder;

        // Read the token on every send; a token swap is visible on the
        // next request without rebuilding the client.
        if let Some(token) = self.tokens.bearer_token().await {
            builder = builder.bearer_auth(token);
        }

        let request = builder.build().map_err(|err| TransportError::Build(err.to_string()))?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending request");

        let response = self.client.execute(request).await.map_err(TransportError::from)?;
        let status = response.status();
        debug!(%method, %url, %status, "received response");

        if status == StatusCode::UNAUTHORIZED {
            // Session-wide logout + redirect, then the caller's own error
            // path still runs on the returned error.
            self.session.session_expired().await;
        }

        if !status.is_success() {
            let message = extract_error_message(response).await;
            return Err(TransportError::Status { status, message });
        }

        Ok(response)
    }
}

/// Decode a 2xx body; empty bodies become JSON `null`
async fn read_json(response: Response) -> Result<Value, TransportError> {
    let text = response.text().await.map_err(TransportError::from)?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|err| TransportError::Decode(err.to_string()))
}

/// Pull the `message` field out of an error body, if there is one
async fn extract_error_message(response: Response) -> Option<String> {
    let text = response.text().await.ok()?;
    let body: Value = serde_json::from_str(&text).ok()?;
    body.get("message").and_then(Value::as_str).map(str::to_owned)
}

/// Builder for [`HttpClient`]
pub struct HttpClientBuilder {
    base_url: String,
    timeout: Duration,
    tokens: Option<Arc<dyn TokenProvider>>,
    session: Option<Arc<dyn SessionGuard>>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            tokens: None,
            session: None,
        }
    }
}

impl HttpClientBuilder {
    /// Base URL every path is appended to; trailing slashes are trimmed
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the token source consulted before every request
    pub fn token_provider(mut self, tokens: Arc<dyn TokenProvider>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Set the guard notified on every 401
    pub fn session_guard(mut self, session: Arc<dyn SessionGuard>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn build(self) -> Result<HttpClient, TransportError> {
        let tokens = self
            .tokens
            .ok_or_else(|| TransportError::Build("token provider not set".to_string()))?;
        let session = self
            .session
            .ok_or_else(|| TransportError::Build("session guard not set".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(TUNNEL_BYPASS_HEADER, HeaderValue::from_static("true"));

        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .no_proxy()
            .build()
            .map_err(|err| TransportError::Build(err.to_string()))?;

        Ok(HttpClient { client, base_url: self.base_url, tokens, session })
    }
}
