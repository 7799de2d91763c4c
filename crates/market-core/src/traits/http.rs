//! Outbound HTTP transport seam.

use crate::error::TransportError;
use async_trait::async_trait;
use std::time::Duration;

/// Raw provider response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Generic GET transport injected into every series source.
///
/// Implementations must enforce `timeout` on the whole request and must not retry.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// Issue a GET request with the given query parameters.
    async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError>;
}
