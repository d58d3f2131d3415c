//! Generation backend port.

use async_trait::async_trait;
use thiserror::Error;

/// The external text-generation collaborator: prompt in, raw text out.
///
/// Implementations must be stateless from the orchestrator's point of view
/// and enforce their own request timeout. Any failure here is an
/// infrastructure fault; the orchestrator never retries it.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate raw text for `prompt` under the given system instruction.
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<String, GenerationError>;
}

/// Transport-level failures of the generation backend.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The backend could not be reached (connection failure or timeout).
    #[error("generation backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with a non-success HTTP status.
    #[error("generation backend returned HTTP {status}: {body}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body, for the error report.
        body: String,
    },

    /// The backend's response envelope could not be decoded.
    #[error("failed to decode generation backend envelope: {0}")]
    Envelope(String),

    /// The backend answered but produced no text content.
    #[error("generation backend response had no text content")]
    Empty,
}
