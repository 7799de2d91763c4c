//! reqwest-backed transport.

use async_trait::async_trait;
use market_core::{HttpFetch, HttpResponse, TransportError};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Production [`HttpFetch`] built on a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestFetch {
    client: Client,
}

impl ReqwestFetch {
    /// Create a new transport.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("market/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;
        Ok(Self { client })
    }
}

fn map_error(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        TransportError::Connection(err.to_string())
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetch {
    async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        // Query values may carry API keys; log the endpoint only.
        debug!("GET {}", url);

        let resp = self
            .client
            .get(url)
            .query(params)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_error(e, timeout))?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| map_error(e, timeout))?;

        Ok(HttpResponse { status, body })
    }
}
