//! Chat fallback for unparseable backend output.
//!
//! Short conversational inputs ("hi", "thanks") are the most common reason
//! the backend answers in plain prose instead of the required JSON
//! envelope. Rather than fail those requests, the classifier turns the raw
//! prose into a chat reply. The trade is deliberate: strict contract
//! enforcement is relaxed only for the highest-frequency failure shape, and
//! only on the first round of a request.

use crate::domain::models::{Candidate, FallbackConfig, ParseFailure};

/// Decides whether a parse failure should be served as a chat reply.
#[derive(Debug, Clone)]
pub struct IntentFallbackClassifier {
    policy: FallbackConfig,
}

impl IntentFallbackClassifier {
    /// Create a classifier with the given policy.
    pub fn new(policy: FallbackConfig) -> Self {
        Self { policy }
    }

    /// Classify a first-round parse failure.
    ///
    /// Returns a synthesized chat candidate wrapping the raw backend text
    /// verbatim when the original prompt looks conversational, `None` when
    /// the failure should be treated as terminal.
    pub fn classify(&self, original_prompt: &str, failure: &ParseFailure) -> Option<Candidate> {
        if self.is_conversational(original_prompt) {
            Some(Candidate::Chat {
                message: failure.raw.clone(),
            })
        } else {
            None
        }
    }

    /// The heuristic: short prompt, or any configured greeting keyword.
    fn is_conversational(&self, prompt: &str) -> bool {
        let lowered = prompt.to_lowercase();
        let words: Vec<&str> = lowered
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|word| !word.is_empty())
            .collect();

        if words.len() <= self.policy.short_prompt_max_words {
            return true;
        }

        self.policy.greetings.iter().any(|keyword| {
            if keyword.contains(' ') {
                // Multi-word courtesy phrases match as substrings.
                lowered.contains(keyword.as_str())
            } else {
                // Single keywords match whole words only, so "hi" does not
                // fire on "this".
                words.iter().any(|word| word == keyword)
            }
        })
    }
}

impl Default for IntentFallbackClassifier {
    fn default() -> Self {
        Self::new(FallbackConfig::default())
    }
}
