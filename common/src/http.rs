//! Centralized HTTP client configuration and building.
//!
//! The admin dashboard talks to a single backend, so every crate builds its
//! client the same way: explicit request and connect deadlines, rustls, and
//! no silent redirect following (a redirected auth call must surface as an
//! error, not replay credentials against another host).

use reqwest::{Client, ClientBuilder, redirect::Policy};
use std::time::Duration;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout, covering the whole request/response cycle (default: 30s)
    pub timeout: Duration,
    /// Connection timeout (default: 10s)
    pub connect_timeout: Duration,
    /// Maximum idle connections kept per host (default: 4)
    pub pool_max_idle_per_host: usize,
    /// User agent string
    pub user_agent: String,
    /// Accept self-signed certificates. Local development only.
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_max_idle_per_host: 4,
            user_agent: "support-platform-admin/1.0".to_string(),
            accept_invalid_certs: false,
        }
    }
}

impl HttpConfig {
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

    /// Accept self-signed certificates, for backends behind a dev proxy.
    #[must_use]
    pub const fn with_invalid_certs(mut self) -> Self {
        self.accept_invalid_certs = true;
        self
    }
}

/// Build a configured HTTP client.
///
/// # Errors
///
/// Returns an error if the client cannot be built (e.g., TLS initialization fails).
///
/// # Examples
///
/// ```
/// use support_common::{HttpConfig, build_http_client};
/// use std::time::Duration;
///
/// let config = HttpConfig::default()
///     .with_timeout(Duration::from_secs(60));
/// let client = build_http_client(&config).expect("Failed to build client");
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .user_agent(&config.user_agent)
        .redirect(Policy::none())
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .use_rustls_tls()
        .build()
}
