//! The generate/verify/correct state machine.
//!
//! One orchestrator instance serves all requests. It holds no mutable
//! state: each call to [`Orchestrator::generate`] is a pure function of the
//! request and the configuration, with all collaborators behind stateless
//! clients, so concurrent requests never interact.
//!
//! Control flow per request:
//!
//! ```text
//! START -> CLASSIFYING -> (CHAT_DONE | VERIFY_LOOP) -> (SUCCESS | EXHAUSTED | FATAL)
//! ```
//!
//! The chat/code branch is decided once, right after the first generation,
//! and never revisited. The loop is bounded by `max_retries` to guarantee
//! forward progress and predictable latency.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::models::{
    Candidate, CodeBundle, FallbackConfig, GenerationRequest, ParseFailure, ParseFailureReason,
    VerificationOutcome,
};
use crate::domain::ports::{ContextRetriever, GenerationBackend, SyntaxVerifier};
use crate::services::fallback::IntentFallbackClassifier;
use crate::services::prompts;
use crate::services::result_parser::{parse_response, ParseOutcome};

/// Which external collaborator an infrastructure fault came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    /// The text-generation backend.
    Generation,
    /// The syntax verification service.
    Verifier,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generation => write!(f, "generation backend"),
            Self::Verifier => write!(f, "verification service"),
        }
    }
}

/// Terminal failures of one orchestration run.
///
/// Every variant carries a stable kind identifier (see
/// [`OrchestratorError::kind`]) so callers never see a generic internal
/// error. Infrastructure faults (`TransportUnavailable`) are deliberately
/// distinct from artifact-quality faults (`VerificationExhausted`).
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A collaborator could not be reached or errored at the transport
    /// level. Fatal for this request; the orchestrator itself never
    /// retries it.
    #[error("{collaborator} is unavailable: {reason}")]
    TransportUnavailable {
        /// Which collaborator failed.
        collaborator: Collaborator,
        /// Transport-level detail for the error report.
        reason: String,
    },

    /// The backend returned text that fails structural decoding and did not
    /// qualify for chat fallback.
    #[error("generation backend returned a malformed response")]
    MalformedResponse {
        /// The raw backend output, for operator visibility.
        raw: String,
    },

    /// The backend's JSON decoded but lacked required fields for its
    /// declared response type, or broke the negotiation mid-loop.
    #[error("generation backend violated its output contract: {detail}")]
    ContractViolation {
        /// What was missing or wrong.
        detail: String,
        /// The raw backend output.
        raw: String,
    },

    /// Every verify/correct cycle produced a verification failure.
    #[error("no syntactically valid code after {attempts} attempts")]
    VerificationExhausted {
        /// How many verification attempts were made.
        attempts: u32,
        /// The last verifier diagnostic, for the caller.
        last_details: String,
    },

    /// The backend declared a `response_type` outside the contract.
    /// Indicates contract drift on the backend side.
    #[error("generation backend declared unknown response type '{kind}'")]
    UnknownResponseType {
        /// The unrecognized discriminator value.
        kind: String,
    },
}

impl OrchestratorError {
    /// Stable identifier for this error kind, used in error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TransportUnavailable { .. } => "transport_unavailable",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::ContractViolation { .. } => "contract_violation",
            Self::VerificationExhausted { .. } => "verification_exhausted",
            Self::UnknownResponseType { .. } => "unknown_response_type",
        }
    }
}

/// Successful result of one orchestration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The request was conversational; no verification happened.
    Chat {
        /// The reply text.
        message: String,
    },
    /// Verified code, with the outcome that accepted it.
    Code {
        /// The final code bundle.
        bundle: CodeBundle,
        /// The successful verification outcome.
        verification: VerificationOutcome,
        /// 1-indexed number of verification attempts consumed.
        attempts: u32,
    },
}

/// The request orchestrator.
///
/// Construct once at startup with immutable configuration and share behind
/// an `Arc`; it is safe to call from any number of concurrent requests.
pub struct Orchestrator {
    backend: Arc<dyn GenerationBackend>,
    verifier: Arc<dyn SyntaxVerifier>,
    retriever: Option<Arc<dyn ContextRetriever>>,
    fallback: IntentFallbackClassifier,
    max_retries: u32,
}

impl Orchestrator {
    /// Create an orchestrator.
    ///
    /// `retriever` is optional; without one (or when it is unreachable) the
    /// initial prompt is sent without context. `max_retries` is the fixed
    /// ceiling on verify/correct cycles per request.
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        verifier: Arc<dyn SyntaxVerifier>,
        retriever: Option<Arc<dyn ContextRetriever>>,
        fallback_policy: FallbackConfig,
        max_retries: u32,
    ) -> Self {
        Self {
            backend,
            verifier,
            retriever,
            fallback: IntentFallbackClassifier::new(fallback_policy),
            max_retries,
        }
    }

    /// Drive one request to a terminal state.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerateOutcome, OrchestratorError> {
        let snippets = self.fetch_context(&request.prompt).await;
        let prompt = prompts::build_user_prompt(&request.prompt, &snippets);

        debug!(context_snippets = snippets.len(), "issuing initial generation call");
        let raw = self
            .backend
            .generate(&prompt, prompts::SYSTEM_INSTRUCTION)
            .await
            .map_err(|err| OrchestratorError::TransportUnavailable {
                collaborator: Collaborator::Generation,
                reason: err.to_string(),
            })?;

        let candidate = match parse_response(&raw) {
            ParseOutcome::Candidate(candidate) => candidate,
            ParseOutcome::UnknownResponseType(kind) => {
                return Err(OrchestratorError::UnknownResponseType { kind });
            }
            ParseOutcome::Failure(failure) => {
                // The conversational heuristic applies only to this first
                // round; later rounds fail hard.
                match self.fallback.classify(&request.prompt, &failure) {
                    Some(candidate) => {
                        info!("unparseable first response served as chat fallback");
                        candidate
                    }
                    None => return Err(Self::failure_to_error(failure)),
                }
            }
        };

        match candidate {
            Candidate::Chat { message } => {
                info!("intent classified as chat");
                Ok(GenerateOutcome::Chat { message })
            }
            Candidate::Code(bundle) => {
                info!("intent classified as code; entering verification loop");
                self.verify_loop(&request.prompt, bundle).await
            }
        }
    }

    /// The bounded verify/correct loop.
    ///
    /// Invariants: the verifier is called at most `max_retries` times; a
    /// correction-round response that is not a well-formed code candidate
    /// is fatal (no second chat fallback, and code never degrades to chat).
    async fn verify_loop(
        &self,
        original_prompt: &str,
        mut bundle: CodeBundle,
    ) -> Result<GenerateOutcome, OrchestratorError> {
        let mut last_details = String::new();

        for attempt in 0..self.max_retries {
            debug!(attempt = attempt + 1, max = self.max_retries, "verifying candidate");
            let outcome = self
                .verifier
                .verify(&bundle.structured_text)
                .await
                .map_err(|err| OrchestratorError::TransportUnavailable {
                    collaborator: Collaborator::Verifier,
                    reason: err.to_string(),
                })?;

            if outcome.is_success() {
                info!(attempts = attempt + 1, "verification succeeded");
                return Ok(GenerateOutcome::Code {
                    bundle,
                    verification: outcome,
                    attempts: attempt + 1,
                });
            }

            warn!(
                attempt = attempt + 1,
                details = %outcome.details,
                "verification failed"
            );
            last_details = outcome.details.clone();

            if attempt + 1 >= self.max_retries {
                break;
            }

            let correction = prompts::build_correction_prompt(&outcome.details, original_prompt);
            let raw = self
                .backend
                .generate(&correction, prompts::SYSTEM_INSTRUCTION)
                .await
                .map_err(|err| OrchestratorError::TransportUnavailable {
                    collaborator: Collaborator::Generation,
                    reason: err.to_string(),
                })?;

            bundle = match parse_response(&raw) {
                ParseOutcome::Candidate(Candidate::Code(corrected)) => corrected,
                ParseOutcome::Candidate(Candidate::Chat { .. }) => {
                    return Err(OrchestratorError::ContractViolation {
                        detail: "backend answered a code correction round with a chat reply"
                            .to_string(),
                        raw,
                    });
                }
                ParseOutcome::UnknownResponseType(kind) => {
                    return Err(OrchestratorError::UnknownResponseType { kind });
                }
                ParseOutcome::Failure(failure) => return Err(Self::failure_to_error(failure)),
            };
        }

        Err(OrchestratorError::VerificationExhausted {
            attempts: self.max_retries,
            last_details,
        })
    }

    /// Query the retrieval service, degrading gracefully on any failure.
    async fn fetch_context(&self, prompt: &str) -> Vec<String> {
        let Some(retriever) = &self.retriever else {
            return Vec::new();
        };

        match retriever.query(prompt).await {
            Ok(snippets) => {
                debug!(count = snippets.len(), "retrieved context snippets");
                snippets
            }
            Err(err) => {
                // The single locally-recovered failure: context is advisory,
                // so the request proceeds without it.
                warn!(error = %err, "context retrieval failed; proceeding without context");
                Vec::new()
            }
        }
    }

    fn failure_to_error(failure: ParseFailure) -> OrchestratorError {
        match failure.reason {
            ParseFailureReason::Decode(_) | ParseFailureReason::MissingDiscriminator => {
                OrchestratorError::MalformedResponse { raw: failure.raw }
            }
            ParseFailureReason::ContractViolation(detail) => OrchestratorError::ContractViolation {
                detail,
                raw: failure.raw,
            },
        }
    }
}
