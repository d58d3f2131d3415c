//! Context retrieval port.

use async_trait::async_trait;
use thiserror::Error;

/// The optional knowledge-base collaborator: query in, ranked snippets out.
///
/// Retrieval is strictly advisory. A failed query must never fail the
/// request; the orchestrator logs it and proceeds with the bare prompt.
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    /// Return context snippets relevant to `prompt`, most relevant first.
    async fn query(&self, prompt: &str) -> Result<Vec<String>, RetrievalError>;
}

/// Transport-level failures of the retrieval service.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The retrieval service could not be reached.
    #[error("retrieval service unreachable: {0}")]
    Unreachable(String),

    /// The retrieval service answered with a non-success HTTP status.
    #[error("retrieval service returned HTTP {status}: {body}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Response body, for the log line.
        body: String,
    },
}
