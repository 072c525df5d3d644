//! Blocking HTTP transport backed by ureq.

use tracing::debug;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// `Transport` that performs real network round-trips with a shared ureq agent.
///
/// Status codes are never turned into errors here, so 4xx and 5xx answers
/// reach the client as data.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn decorate<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.path.as_str();
        let body = request.body.as_deref().map(str::as_bytes);

        let result = match (request.method, body) {
            (HttpMethod::Get, _) => decorate(self.agent.get(url), request).call(),
            (HttpMethod::Delete, None) => decorate(self.agent.delete(url), request).call(),
            (HttpMethod::Delete, Some(bytes)) => {
                decorate(self.agent.delete(url), request).force_send_body().send(bytes)
            }
            (HttpMethod::Post, Some(bytes)) => decorate(self.agent.post(url), request).send(bytes),
            (HttpMethod::Post, None) => decorate(self.agent.post(url), request).send_empty(),
            (HttpMethod::Put, Some(bytes)) => decorate(self.agent.put(url), request).send(bytes),
            (HttpMethod::Put, None) => decorate(self.agent.put(url), request).send_empty(),
            (HttpMethod::Patch, Some(bytes)) => decorate(self.agent.patch(url), request).send(bytes),
            (HttpMethod::Patch, None) => decorate(self.agent.patch(url), request).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError::Network(e.to_string()))?;

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
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        debug!(method = %request.method, url, status, "request completed.");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
