//! Client configuration.

use std::time::Duration;

use support_common::HttpConfig;

/// Admin API client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL, including the API prefix (no trailing slash needed)
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("SUPPORT_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string()),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: "support-platform-admin/1.0".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create a configuration for the given backend base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub(crate) fn http_config(&self) -> HttpConfig {
        HttpConfig::default()
            .with_timeout(self.timeout)
            .with_connect_timeout(self.connect_timeout)
            .with_user_agent(self.user_agent.clone())
    }

    /// Absolute URL for an API path. `path` must start with `/`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
