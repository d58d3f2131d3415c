//! Infrastructure layer: HTTP adapters for the external collaborators and
//! the configuration loader.

pub mod config;
pub mod gemini;
pub mod retrieval;
pub mod verifier;
