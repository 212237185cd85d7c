//! Request transport.
//!
//! [`Transport`] is the seam between the refresh logic and the network.
//! [`HttpTransport`] adds:
//! - Base URL resolution
//! - Request/response tracing
//! - Timeout mapping

use async_trait::async_trait;
use reqwest::{Client, header};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::FetchError;
use crate::request::{ApiRequest, ApiResponse};
use crate::settings::ClientSettings;

/// User agent string for Shopfront.
const USER_AGENT: &str = concat!("Shopfront/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Transport Trait
// ============================================================================

/// Sends a single request. Never retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns whatever the server answered.
    ///
    /// Non-success statuses are `Ok`; only transport failures are `Err`.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, FetchError>;
}

// ============================================================================
// HTTP Transport
// ============================================================================

/// `reqwest` backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
    api_url: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport for the API described by `settings`.
    pub fn new(settings: &ClientSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let api_url = settings.api_url();
        Url::parse(&api_url).map_err(|e| FetchError::InvalidUrl(format!("{api_url}: {e}")))?;

        Ok(Self {
            inner: client,
            api_url,
            timeout: settings.request_timeout,
        })
    }

    /// Resolves a request path against the API root.
    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        let url = format!("{}/{}", self.api_url, path.trim_start_matches('/'));
        Url::parse(&url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))
    }

    fn map_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout.as_secs())
        } else {
            FetchError::Http(err)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, FetchError> {
        let url = self.endpoint(&request.path)?;
        debug!(retried = request.retried, "Sending request");

        let mut builder = self.inner.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(auth) = &request.authorization {
            builder = builder.header(header::AUTHORIZATION, auth.header_value());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        debug!(status = %status, bytes = body.len(), "Response received");
        Ok(ApiResponse::new(status, body))
    }
}

// ============================================================================
// Tests
// ============================================================================
