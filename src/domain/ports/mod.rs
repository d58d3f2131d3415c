//! Collaborator traits the orchestrator is built against.
//!
//! Each external service gets one narrow trait plus its own transport error
//! type, so the state machine can dispatch on outcomes explicitly instead of
//! inspecting exception-like blobs.

pub mod generation;
pub mod retrieval;
pub mod verifier;

pub use generation::{GenerationBackend, GenerationError};
pub use retrieval::{ContextRetriever, RetrievalError};
pub use verifier::{SyntaxVerifier, VerifierError};
