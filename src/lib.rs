//! Stweave - Verified Structured Text Generation Service
//!
//! Stweave turns a natural-language request into verified IEC 61131-3
//! Structured Text by round-tripping between a text-generation backend and
//! a syntax verifier, correcting the generated artifact when verification
//! fails. The heart of the crate is a bounded generate/verify/correct state
//! machine; everything external is a collaborator behind a narrow port.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Request-scoped data models and collaborator ports
//! - **Service Layer** (`services`): The orchestrator state machine, result
//!   parsing, fallback classification, and prompt composition
//! - **Infrastructure Layer** (`infrastructure`): HTTP adapters for the
//!   generation backend, verifier, and knowledge base; config loading
//! - **API Layer** (`api`): The axum HTTP surface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use stweave::services::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Build collaborator clients, construct the orchestrator, serve.
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Candidate, CodeBundle, Config, FallbackConfig, GenerationRequest, ParseFailure,
    ParseFailureReason, VerificationOutcome, VerificationStatus,
};
pub use domain::ports::{
    ContextRetriever, GenerationBackend, GenerationError, RetrievalError, SyntaxVerifier,
    VerifierError,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{GenerateOutcome, Orchestrator, OrchestratorError};
