//! Artifacts negotiated between the generation backend and the verifier.
//!
//! All of these are request-scoped: they are created while handling one
//! `/generate` call and dropped when the response is written. Nothing here
//! outlives a request or is shared across requests.

use serde::{Deserialize, Serialize};

/// One inbound generation request.
///
/// Created per call, immutable, owned by a single orchestrator invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The natural-language request from the user.
    pub prompt: String,
}

/// The structured artifact produced by one generation call.
///
/// The chat/code branch is decided once, immediately after the first
/// generation, and never revisited: a candidate that starts as code cannot
/// degrade into chat mid-loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// A conversational reply; returned to the caller without verification.
    Chat {
        /// The reply text.
        message: String,
    },
    /// A Structured Text bundle; enters the verify/correct loop.
    Code(CodeBundle),
}

/// The six-field code artifact the generation backend is contracted to emit
/// for `generate_code` intent.
///
/// `structured_text` is the only field the verifier consumes; the rest are
/// returned to the caller verbatim. A bundle with empty `structured_text`
/// never gets this far: the parser rejects it as a contract violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBundle {
    /// Brief description of the generated logic.
    #[serde(default)]
    pub explanation: String,
    /// The complete VAR/END_VAR block.
    #[serde(default)]
    pub required_variables: String,
    /// The executable Structured Text logic.
    pub structured_text: String,
    /// The backend's own safety and logic review.
    #[serde(default)]
    pub verification_notes: String,
    /// Step-by-step execution trace.
    #[serde(default)]
    pub simulation_trace: String,
}

/// Raw backend output that failed structural decoding, plus why.
///
/// Transient: consumed immediately by the fallback classifier or surfaced as
/// a terminal error. Never cached or carried across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// The raw text exactly as the backend returned it (fences included).
    pub raw: String,
    /// What went wrong during decoding.
    pub reason: ParseFailureReason,
}

/// Why a backend response failed to decode into a [`Candidate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailureReason {
    /// The text was not valid JSON at all.
    Decode(String),
    /// Valid JSON, but no `response_type` discriminator.
    MissingDiscriminator,
    /// Valid JSON that declared a type but lacked its required fields.
    ContractViolation(String),
}
