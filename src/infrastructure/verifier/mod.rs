//! HTTP client for the Structured Text verification service.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::models::{VerificationOutcome, VerifierConfig};
use crate::domain::ports::{SyntaxVerifier, VerifierError};

/// Verifier client speaking the `POST /verify` contract.
pub struct HttpVerifier {
    http_client: ReqwestClient,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    st_code: &'a str,
}

/// The verifier's wire response. Its status vocabulary is "success" and
/// "error"; anything that is not "success" maps to a failure outcome.
#[derive(Debug, Deserialize)]
struct VerifyResponse {
    status: String,
    #[serde(default)]
    details: String,
}

impl HttpVerifier {
    /// Create a client from configuration.
    pub fn new(config: &VerifierConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client for the verification service")?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SyntaxVerifier for HttpVerifier {
    async fn verify(&self, source: &str) -> Result<VerificationOutcome, VerifierError> {
        debug!(source_len = source.len(), "calling verification service");

        let response = self
            .http_client
            .post(format!("{}/verify", self.base_url))
            .json(&VerifyRequest { st_code: source })
            .send()
            .await
            .map_err(|err| VerifierError::Unreachable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error response".to_string());
            return Err(VerifierError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: VerifyResponse = response
            .json()
            .await
            .map_err(|err| VerifierError::Unreachable(err.to_string()))?;

        if parsed.status == "success" {
            Ok(VerificationOutcome::success(parsed.details))
        } else {
            Ok(VerificationOutcome::failure(parsed.details))
        }
    }
}
