//! Service layer: the self-correction control loop and its helpers.

pub mod fallback;
pub mod orchestrator;
pub mod prompts;
pub mod result_parser;

pub use fallback::IntentFallbackClassifier;
pub use orchestrator::{Collaborator, GenerateOutcome, Orchestrator, OrchestratorError};
pub use result_parser::{parse_response, ParseOutcome};
