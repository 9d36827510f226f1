//! Request Dispatcher
//!
//! Sends requests with the context's credentials attached and drives the
//! challenge → handshake → replay cycle. Replay is capped at one per
//! original call: a request challenged again after a fresh token is a hard
//! authentication failure, never a loop.

use crate::context::AuthContext;
use crate::error::{AuthError, Result};
use crate::handshake::Handshake;
use crate::{is_auth_challenge, HAS_API_KEY_HEADER, OAUTH_SOURCE_HEADER};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use std::sync::Arc;
use tracing::{debug, info};

/// A request the dispatcher can send and replay.
///
/// Named, enumerated fields only — header and option merging happens here,
/// in one place, not by copying dynamic properties around.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,

    /// Absolute request URL
    pub url: String,

    /// Additional request headers
    pub headers: Vec<(String, String)>,

    /// Request body, if any
    pub body: Option<String>,

    /// Content-type of the body, if any
    pub content_type: Option<String>,
}

impl ApiRequest {
    /// A GET request for `url`.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// A POST request for `url`.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// A request with an arbitrary method.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            content_type: None,
        }
    }

    /// Add a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the content-type of the body.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A buffered response: status, headers, and body text.
#[derive(Debug)]
pub struct ApiResponse {
    /// Response status
    pub status: StatusCode,

    /// Response headers
    pub headers: HeaderMap,

    /// Response body
    pub body: String,
}

impl ApiResponse {
    /// A response header as text, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Deserialize the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> std::result::Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Sends requests on behalf of a credential context.
#[derive(Clone)]
pub struct RequestDispatcher {
    client: reqwest::Client,
    context: Arc<AuthContext>,
}

impl RequestDispatcher {
    /// Create a dispatcher with a fresh HTTP client.
    pub fn new(context: Arc<AuthContext>) -> Self {
        Self::with_client(reqwest::Client::new(), context)
    }

    /// Create a dispatcher reusing an existing HTTP client.
    pub fn with_client(client: reqwest::Client, context: Arc<AuthContext>) -> Self {
        Self { client, context }
    }

    /// The credential context this dispatcher sends on behalf of.
    pub fn context(&self) -> &Arc<AuthContext> {
        &self.context
    }

    /// Send a request.
    ///
    /// On an authentication challenge with a configured API key: run one
    /// handshake, then replay the identical request exactly once. A replay
    /// that is challenged again is [`AuthError::ReplayRejected`]. Without a
    /// configured key the challenge response is returned unmodified and no
    /// handshake is attempted.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let response = self.execute(request).await?;

        if !is_auth_challenge(response.status) {
            return Ok(response);
        }

        if !self.context.has_api_key() {
            debug!(
                status = response.status.as_u16(),
                url = %request.url,
                "challenge received but no API key configured, returning as-is"
            );
            return Ok(response);
        }

        let oauth_source = response
            .header(OAUTH_SOURCE_HEADER)
            .ok_or_else(|| {
                AuthError::KeyExchangeFailure(format!(
                    "challenge carries no {} header",
                    OAUTH_SOURCE_HEADER
                ))
            })?
            .to_string();

        info!(
            status = response.status.as_u16(),
            url = %request.url,
            oauth_source = %oauth_source,
            "authentication challenge received, starting handshake"
        );

        Handshake::new(self.client.clone(), self.context.clone())
            .run(&oauth_source)
            .await?;

        let replay = self.execute(request).await?;
        if is_auth_challenge(replay.status) {
            return Err(AuthError::ReplayRejected {
                status: replay.status.as_u16(),
            });
        }

        Ok(replay)
    }

    /// Execute one attempt: build the request, attach the context's
    /// credentials, send, and buffer the response.
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut builder = self.client.request(request.method.clone(), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(content_type) = &request.content_type {
            builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
        }

        if self.context.has_api_key() {
            builder = builder.header(HAS_API_KEY_HEADER, "True");
        }

        if let Some(auth_header) = self.context.auth_header().await {
            builder = builder.header(reqwest::header::AUTHORIZATION, auth_header);
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
