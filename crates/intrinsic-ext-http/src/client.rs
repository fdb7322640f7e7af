//! HTTP transport seam.
//!
//! Quote sources talk to [`HttpClient`] rather than to reqwest directly so they can be exercised
//! offline with canned responses.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use intrinsic_traits::error::TraitError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Minimal GET transport.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issues a GET request. Transport failures map to [`TraitError::SourceNotAvailable`];
    /// non-2xx statuses are returned as responses.
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TraitError>;
}

/// reqwest-backed client.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
}

impl ReqwestHttpClient {
    /// Creates a client with the crate's user agent.
    pub fn new() -> Self {
        Self {
            client: Arc::new(
                reqwest::Client::builder()
                    .user_agent(concat!("intrinsic/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .unwrap_or_else(|_| reqwest::Client::new()),
            ),
        }
    }

    /// Wraps an existing reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TraitError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TraitError::SourceNotAvailable(format!("request timeout: {e}"))
                } else if e.is_connect() {
                    TraitError::SourceNotAvailable(format!("connection failed: {e}"))
                } else {
                    TraitError::SourceNotAvailable(format!("request failed: {e}"))
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TraitError::IoError(format!("failed to read response body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}
