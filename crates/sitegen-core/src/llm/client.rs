//! Gemini LLM client implementation
//!
//! Async HTTP client for the Gemini generateContent endpoint. One request per
//! call; failures surface immediately without retry or model fallback.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::TextGenerator;
use super::types::{GenerateContentRequest, GenerateContentResponse, GenerationConfig};

/// Gemini LLM client
///
/// Thread-safe; clones share the underlying connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: HttpClient,
    model: String,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// Builder for creating a GeminiClient
#[derive(Default)]
pub struct GeminiClientBuilder {
    config: Option<LlmConfig>,
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl GeminiClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the LLM configuration
    pub fn config(mut self, config: LlmConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the base URL from the configuration
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Bound every request; without this AI calls are unbounded
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Build the GeminiClient
    pub fn build(self) -> Result<GeminiClient> {
        let config = self.config.unwrap_or_default();
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::LLMError("API key is required".to_string()))?;

        let mut http_builder = HttpClient::builder();
        if let Some(secs) = self.timeout_secs.or(config.timeout_secs) {
            http_builder = http_builder.timeout(Duration::from_secs(secs));
        }
        let http_client = http_builder.build().map_err(Error::NetworkError)?;

        let base_url = self.base_url.unwrap_or(config.base_url);

        Ok(GeminiClient {
            http_client,
            model: config.model,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl GeminiClient {
    /// Create a new GeminiClient with the given configuration and API key
    pub fn new(config: LlmConfig, api_key: impl Into<String>) -> Result<Self> {
        GeminiClientBuilder::new()
            .config(config)
            .api_key(api_key)
            .build()
    }

    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::new()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Send a single generateContent request
    async fn send_request(&self, request: &GenerateContentRequest) -> Result<String> {
        let url = self.endpoint();

        debug!(
            model = %self.model,
            prompt_chars = request.contents.iter().map(|c| c.text().len()).sum::<usize>(),
            max_output_tokens = request.generation_config.max_output_tokens,
            "Sending generateContent request"
        );

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(Error::NetworkError)?;

        let status = response.status();

        if !status.is_success() {
            return self.handle_error_response(status, response).await;
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::LLMError(format!("Failed to parse response: {}", e)))?;

        match body.text() {
            Some(text) => Ok(text),
            None => {
                let reason = body.block_reason().unwrap_or("no candidates returned");
                warn!(model = %self.model, reason = %reason, "Empty response from API");
                Err(Error::LLMError(format!("Empty response from API ({})", reason)))
            }
        }
    }

    /// Handle error responses from the API
    async fn handle_error_response<T>(
        &self,
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> Result<T> {
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, "generateContent request failed");

        match status.as_u16() {
            400 => Err(Error::LLMError(format!("Bad request: {}", body))),
            401 | 403 => Err(Error::LLMError(format!(
                "Unauthorized: check the GEMINI_API_KEY environment variable: {}",
                body
            ))),
            404 => Err(Error::LLMError(format!(
                "Model '{}' not found or endpoint unavailable: {}",
                self.model, body
            ))),
            429 => Err(Error::LLMError(format!("Quota exceeded: {}", body))),
            500..=599 => Err(Error::LLMError(format!("Server error ({}): {}", status, body))),
            _ => Err(Error::LLMError(format!("HTTP error {}: {}", status, body))),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        let request = GenerateContentRequest::new(prompt, *config);
        self.send_request(&request).await
    }
}
