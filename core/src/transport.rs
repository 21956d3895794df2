//! Default blocking `HttpExecutor` backed by `ureq`.

use std::time::Duration;

use tracing::debug;

use crate::error::TransportError;
use crate::http::{HttpExecutor, HttpMethod, HttpRequest, HttpResponse};

/// Timeout applied to the whole exchange by the default executor.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Executes requests with a `ureq` agent.
///
/// 4xx/5xx responses come back as `HttpResponse` rather than `Err`, leaving
/// status interpretation to the classifier.
#[derive(Debug, Clone)]
pub struct UreqExecutor {
    agent: ureq::Agent,
}

impl UreqExecutor {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpExecutor for UreqExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        // The query string carries the API key.
        let endpoint = request.url.split('?').next().unwrap_or_default();
        debug!(method = request.method.as_str(), endpoint, "executing http request");

        let mut builder = match request.method {
            HttpMethod::Post => self.agent.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder
            .send(request.body.as_bytes())
            .map_err(|e| TransportError::Send(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // Error bodies are not guaranteed to be UTF-8; classification still
        // needs the status, so decode lossily.
        let raw = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| TransportError::Read(e.to_string()))?;
        let body = String::from_utf8_lossy(&raw).into_owned();

        debug!(status, body_len = body.len(), "received http response");
        Ok(HttpResponse { status, headers, body })
    }
}
