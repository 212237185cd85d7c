//! Client settings.

use std::time::Duration;

/// Default API host.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Default API version path segment.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Default timeout for ordinary requests.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound on the token refresh exchange.
const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(15);

/// Settings for the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// API host, e.g. `https://shop.example.com`.
    pub api_base_url: String,
    /// Version segment appended to the host.
    pub api_version: String,
    /// Timeout for each request.
    pub request_timeout: Duration,
    /// Timeout for the refresh exchange.
    pub refresh_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            refresh_timeout: DEFAULT_REFRESH_TIMEOUT,
        }
    }
}

impl ClientSettings {
    /// Creates settings for the given API host.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the version segment.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the refresh timeout.
    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    /// Full API root: `{api_base_url}/{api_version}`.
    pub fn api_url(&self) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        let version = self.api_version.trim_matches('/');
        if version.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{version}")
        }
    }
}
