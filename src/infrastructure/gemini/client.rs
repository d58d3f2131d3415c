//! HTTP client for the Gemini generateContent API.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use tracing::debug;

use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::domain::models::LlmConfig;
use crate::domain::ports::{GenerationBackend, GenerationError};

/// Generation backend over the Gemini HTTP API.
///
/// Holds a pooled `reqwest::Client` with a per-request timeout; a timed-out
/// call surfaces as [`GenerationError::Unreachable`], which the orchestrator
/// treats as collaborator unavailability.
pub struct GeminiClient {
    http_client: ReqwestClient,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client from configuration.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .build()
            .context("Failed to build HTTP client for the generation backend")?;

        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<String, GenerationError> {
        let request = GenerateContentRequest::single_turn(system_instruction, prompt);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        debug!(model = %self.model, prompt_len = prompt.len(), "calling generation backend");

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| GenerationError::Unreachable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error response".to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| GenerationError::Envelope(err.to_string()))?;

        parsed.first_text().ok_or(GenerationError::Empty)
    }
}
