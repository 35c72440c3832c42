//! Runtime reached through the Ollama HTTP API

use super::{truncate_chars, ModelRuntime};
use async_trait::async_trait;
use hamcaller_core::{Error, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

/// Calls `POST {base_url}/api/generate` with streaming disabled
#[derive(Debug, Clone)]
pub struct OllamaHttpRuntime {
    client: reqwest::Client,
    base_url: String,
    temperature: Option<f32>,
    probe_timeout: Duration,
}

impl OllamaHttpRuntime {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            temperature: None,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Sampling temperature passed in the request options
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Bound on the `/api/tags` health check
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `bound` is the request timeout that was set, if any
    fn request_error(&self, err: reqwest::Error, bound: Option<Duration>) -> Error {
        if err.is_timeout() {
            match bound {
                Some(bound) => Error::RuntimeTimeout(bound),
                None => Error::unavailable(format!("request to Ollama timed out: {}", err)),
            }
        } else if err.is_connect() {
            Error::unavailable(format!(
                "cannot connect to Ollama at {}; is `ollama serve` running?",
                self.base_url
            ))
        } else if err.is_decode() {
            Error::malformed(err.to_string())
        } else {
            Error::unavailable(err.to_string())
        }
    }
}

impl Default for OllamaHttpRuntime {
    fn default() -> Self {
        Self::new(DEFAULT_OLLAMA_URL)
    }
}

#[async_trait]
impl ModelRuntime for OllamaHttpRuntime {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        debug!(%url, model, "Calling Ollama generate API");

        let payload = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: self
                .temperature
                .map(|temperature| GenerateOptions { temperature }),
        };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.request_error(e, None))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Ollama generate request failed");
            let message = format!(
                "Ollama returned {}: {}",
                status,
                truncate_chars(body.trim(), 200)
            );
            // 404 is a model that was never pulled, 5xx a model that failed to load
            return Err(if status == StatusCode::NOT_FOUND || status.is_server_error() {
                Error::unavailable(message)
            } else {
                Error::malformed(message)
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| self.request_error(e, None))?;
        body.response
            .ok_or_else(|| Error::malformed("Ollama response has no `response` field"))
    }

    async fn probe(&self) -> Result<()> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| self.request_error(e, Some(self.probe_timeout)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::unavailable(format!(
                "Ollama responded with status {}",
                response.status()
            )))
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}
