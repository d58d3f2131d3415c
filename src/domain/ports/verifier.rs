//! Syntax verifier port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::VerificationOutcome;

/// The external syntax verifier: source text in, pass/fail plus diagnostic
/// out.
///
/// The verifier is a pure function of its input; how it parses the grammar
/// is its own business. It must be called with exactly the candidate's
/// `structured_text`.
#[async_trait]
pub trait SyntaxVerifier: Send + Sync {
    /// Verify one piece of Structured Text source.
    async fn verify(&self, source: &str) -> Result<VerificationOutcome, VerifierError>;
}

/// Transport-level failures of the verifier.
///
/// A verification *failure* is not an error: it comes back as a normal
/// [`VerificationOutcome`]. These variants mean the verifier itself could
/// not be consulted.
#[derive(Debug, Error)]
pub enum VerifierError {
    /// The verifier could not be reached (connection failure or timeout).
    #[error("verification service unreachable: {0}")]
    Unreachable(String),

    /// The verifier answered with a non-success HTTP status.
    #[error("verification service returned HTTP {status}: {body}")]
    Api {
        /// HTTP status code returned by the verifier.
        status: u16,
        /// Response body, for the error report.
        body: String,
    },
}
