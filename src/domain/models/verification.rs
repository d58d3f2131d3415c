//! Verifier result types.

use serde::{Deserialize, Serialize};

/// The result of one verifier call.
///
/// Produced once per call and never mutated; consumed either to build the
/// next correction prompt or to terminate the loop. The verifier is a pure
/// function of the source text, so verifying the same text twice yields the
/// same outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Whether the source text passed syntax verification.
    pub status: VerificationStatus,
    /// Diagnostic text from the verifier. Passed through verbatim into
    /// correction prompts; never truncated or summarized.
    #[serde(default)]
    pub details: String,
}

/// Pass/fail discriminator for a verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// The source text is syntactically valid.
    Success,
    /// The source text was rejected; `details` carries the diagnostic.
    Failure,
}

impl VerificationOutcome {
    /// Build a success outcome.
    pub fn success(details: impl Into<String>) -> Self {
        Self {
            status: VerificationStatus::Success,
            details: details.into(),
        }
    }

    /// Build a failure outcome carrying the verifier diagnostic.
    pub fn failure(details: impl Into<String>) -> Self {
        Self {
            status: VerificationStatus::Failure,
            details: details.into(),
        }
    }

    /// True when the source text passed verification.
    pub fn is_success(&self) -> bool {
        self.status == VerificationStatus::Success
    }
}
