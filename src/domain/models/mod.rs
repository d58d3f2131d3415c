//! Pure domain data: request-scoped artifacts and service configuration.

pub mod candidate;
pub mod config;
pub mod verification;

pub use candidate::{
    Candidate, CodeBundle, GenerationRequest, ParseFailure, ParseFailureReason,
};
pub use config::{
    Config, FallbackConfig, GenerationConfig, LlmConfig, LoggingConfig, RetrievalConfig,
    ServerConfig, VerifierConfig,
};
pub use verification::{VerificationOutcome, VerificationStatus};
