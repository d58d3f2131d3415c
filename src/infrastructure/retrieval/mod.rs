//! HTTP client for the knowledge-base retrieval service.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::models::RetrievalConfig;
use crate::domain::ports::{ContextRetriever, RetrievalError};

/// Retrieval client speaking the `POST /query-kb` contract.
pub struct KnowledgeBaseClient {
    http_client: ReqwestClient,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    snippets: Vec<String>,
}

impl KnowledgeBaseClient {
    /// Create a client from configuration.
    pub fn new(config: &RetrievalConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client for the retrieval service")?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ContextRetriever for KnowledgeBaseClient {
    async fn query(&self, prompt: &str) -> Result<Vec<String>, RetrievalError> {
        debug!("querying knowledge base");

        let response = self
            .http_client
            .post(format!("{}/query-kb", self.base_url))
            .json(&QueryRequest { prompt })
            .send()
            .await
            .map_err(|err| RetrievalError::Unreachable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error response".to_string());
            return Err(RetrievalError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|err| RetrievalError::Unreachable(err.to_string()))?;

        Ok(parsed.snippets)
    }
}
