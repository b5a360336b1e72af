use crate::llm::config::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur in LLM service
#[derive(Debug, Error)]
pub enum LlmServiceError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Could not connect to Ollama API at {url}: {message}")]
    Connection { url: String, message: String },

    #[error("API error: HTTP {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Request to Ollama timed out after {0} seconds")]
    Timeout(u64),

    #[error("Ollama returned an empty response")]
    EmptyResponse,
}

/// Anything that can turn a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion with the generator's configured sampling options
    async fn generate(&self, prompt: &str) -> Result<String, LlmServiceError>;

    /// Generate with a temperature used only when none is configured
    async fn generate_with_default_temperature(
        &self,
        prompt: &str,
        _temperature: f32,
    ) -> Result<String, LlmServiceError> {
        self.generate(prompt).await
    }
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    async fn generate(&self, prompt: &str) -> Result<String, LlmServiceError> {
        (**self).generate(prompt).await
    }

    async fn generate_with_default_temperature(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, LlmServiceError> {
        (**self).generate_with_default_temperature(prompt, temperature).await
    }
}

/// `/api/generate` request body
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Default, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

/// `/api/generate` response body (non-streaming)
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

/// Service for talking to an Ollama-compatible inference endpoint
pub struct LlmService {
    client: Client,
    config: LlmConfig,
}

impl LlmService {
    /// Create a new LLM service from configuration
    pub fn new(config: LlmConfig) -> Result<Self, LlmServiceError> {
        config.validate().map_err(LlmServiceError::ConfigError)?;

        let client = Client::builder()
            .build()
            .map_err(|e| LlmServiceError::ConfigError(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn send(&self, prompt: &str, options: GenerateOptions) -> Result<String, LlmServiceError> {
        let url = self.config.api_url.as_str();
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options,
        };

        tracing::info!("Querying Ollama model '{}' at {}", self.config.model, url);
        if self.config.debug {
            tracing::debug!(
                "Sampling options: temperature={:?}, top_k={:?}, top_p={:?}; prompt length {} chars",
                request.options.temperature,
                request.options.top_k,
                request.options.top_p,
                prompt.len()
            );
        }

        // The deadline covers headers and body alike
        let exchange = async {
            let response = self
                .client
                .post(url)
                .json(&request)
                .send()
                .await
                .map_err(|e| LlmServiceError::Connection {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmServiceError::ApiError {
                    status: status.as_u16(),
                    body,
                });
            }

            response
                .text()
                .await
                .map_err(|e| LlmServiceError::ParseError(e.to_string()))
        };

        let body = tokio::time::timeout(Duration::from_secs(self.config.timeout_secs), exchange)
            .await
            .map_err(|_| LlmServiceError::Timeout(self.config.timeout_secs))??;

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            LlmServiceError::ParseError(format!("invalid JSON from Ollama ({}): {}", e, body))
        })?;

        let content = parsed
            .response
            .ok_or_else(|| LlmServiceError::ParseError("response missing 'response' field".to_string()))?
            .trim()
            .to_string();

        if content.is_empty() {
            return Err(LlmServiceError::EmptyResponse);
        }

        if self.config.debug {
            tracing::debug!("Received response: {} chars", content.len());
        }

        Ok(content)
    }

    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            temperature: self.config.temperature,
            top_k: self.config.top_k,
            top_p: self.config.top_p,
        }
    }
}

#[async_trait]
impl TextGenerator for LlmService {
    async fn generate(&self, prompt: &str) -> Result<String, LlmServiceError> {
        self.send(prompt, self.options()).await
    }

    async fn generate_with_default_temperature(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, LlmServiceError> {
        let mut options = self.options();
        options.temperature.get_or_insert(temperature);
        self.send(prompt, options).await
    }
}
