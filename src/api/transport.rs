//! HTTP transport abstraction
//!
//! Provides a trait for sending API requests that can be implemented by
//! different backends (ureq over the network, scripted fakes in tests).

use crate::error::{AuthError, AuthResult};
use async_trait::async_trait;
use std::fmt;
use tracing::debug;

/// HTTP method used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A request against an API path, relative to the configured base URL
#[derive(Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Option<String>,
}

impl ApiRequest {
    /// Build a GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            bearer: None,
            body: None,
        }
    }

    /// Build a POST request with a JSON body
    pub fn post_json(path: impl Into<String>, body: String) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            bearer: None,
            body: Some(body),
        }
    }

    /// Attach a bearer token
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

// Bodies carry passwords and the bearer is a credential
impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("bearer", &self.bearer.as_ref().map(|_| REDACTED))
            .field("body", &self.body.as_ref().map(|_| REDACTED))
            .finish()
    }
}

/// Placeholder shown instead of secrets in debug output
pub(crate) const REDACTED: &str = "[redacted]";

/// Raw status and body returned by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract HTTP transport interface
///
/// Any status code the server answers with is a successful send; only a
/// request that could not be completed is an error.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the raw response
    async fn send(&self, request: ApiRequest) -> AuthResult<ApiResponse>;
}

/// Transport backed by a blocking ureq agent
pub struct UreqTransport {
    agent: ureq::Agent,
    base_url: String,
}

impl UreqTransport {
    /// Create a transport for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: ApiRequest) -> AuthResult<ApiResponse> {
        let url = self.url_for(&request.path);
        debug!("{} {}", request.method.as_str(), url);

        // ureq blocks, keep it off the async workers
        let agent = self.agent.clone();
        let response = tokio::task::spawn_blocking(move || execute(&agent, &url, request))
            .await
            .map_err(|e| AuthError::Internal(format!("HTTP task failed: {}", e)))??;

        debug!("Response status {}", response.status);
        Ok(response)
    }
}

fn execute(agent: &ureq::Agent, url: &str, request: ApiRequest) -> AuthResult<ApiResponse> {
    let authorization = request.bearer.map(|token| format!("Bearer {}", token));

    let result = match request.method {
        Method::Get => {
            let mut builder = agent.get(url).header("Content-Type", "application/json");
            if let Some(ref value) = authorization {
                builder = builder.header("Authorization", value);
            }
            builder.call()
        }
        Method::Post => {
            let mut builder = agent.post(url).header("Content-Type", "application/json");
            if let Some(ref value) = authorization {
                builder = builder.header("Authorization", value);
            }
            builder.send(request.body.unwrap_or_default().as_str())
        }
    };

    let mut response = result.map_err(AuthError::network)?;
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(AuthError::network)?;

    Ok(ApiResponse { status, body })
}
