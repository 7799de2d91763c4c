//! Canned transport for adapter tests.

use async_trait::async_trait;
use market_core::{HttpFetch, HttpResponse, TransportError};
use std::sync::Mutex;
use std::time::Duration;

/// Recorded GET request.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub url: String,
    pub params: Vec<(String, String)>,
    pub timeout: Duration,
}

impl RecordedCall {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Answers requests whose URL ends with a registered path; anything else gets a 404.
#[derive(Default)]
pub(crate) struct StubFetch {
    routes: Vec<(String, Result<HttpResponse, TransportError>)>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes
            .push((path.to_string(), Ok(HttpResponse::new(status, body))));
        self
    }

    pub fn fail(mut self, path: &str, err: TransportError) -> Self {
        self.routes.push((path.to_string(), Err(err)));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpFetch for StubFetch {
    async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            timeout,
        });

        self.routes
            .iter()
            .find(|(path, _)| url.ends_with(path.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| Ok(HttpResponse::new(404, "not found")))
    }
}
