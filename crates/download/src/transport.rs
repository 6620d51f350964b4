//! Transport to the font-generation server.

use std::time::Duration;

use axisdeck_core::{FontFormat, GenerateRequest, config::HEALTH_PATH};
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::{Error, Result};

/// Sends one generation request and returns the font bytes.
pub trait Transport {
    fn generate(&self, format: FontFormat, request: &GenerateRequest) -> Result<Vec<u8>>;

    /// Where requests go, for user-facing messages.
    fn location(&self) -> String {
        "the font server".to_string()
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn generate(&self, format: FontFormat, request: &GenerateRequest) -> Result<Vec<u8>> {
        (**self).generate(format, request)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

/// JSON-over-HTTP transport on a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

impl HttpTransport {
    /// `timeout` of `None` waits for the server indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| Error::Http { url: base_url.clone(), source })?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Probes `GET /health`, which answers `{"status": "ok"}`.
    pub fn health(&self) -> Result<()> {
        let url = self.url(HEALTH_PATH);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| Error::Http { url: url.clone(), source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { url, status });
        }

        let health: HealthResponse =
            response.json().map_err(|source| Error::Http { url: url.clone(), source })?;
        if health.status != "ok" {
            return Err(Error::Unhealthy(health.status));
        }
        Ok(())
    }
}

impl Transport for HttpTransport {
    fn generate(&self, format: FontFormat, request: &GenerateRequest) -> Result<Vec<u8>> {
        let url = self.url(format.endpoint());
        debug!("POST {url} ({} axes)", request.axes.len());

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|source| Error::Http { url: url.clone(), source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { url, status });
        }

        let bytes = response.bytes().map_err(|source| Error::Http { url: url.clone(), source })?;
        Ok(bytes.to_vec())
    }

    fn location(&self) -> String {
        self.base_url.clone()
    }
}
