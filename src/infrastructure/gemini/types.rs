//! Wire types for the Gemini generateContent API.

use serde::{Deserialize, Serialize};

/// Request body for a generateContent call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    /// System instruction applied to the whole conversation.
    pub system_instruction: Content,
    /// Conversation turns; a single user turn for this service.
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Build a single-turn request.
    pub fn single_turn(system_instruction: &str, prompt: &str) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: system_instruction.to_string(),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// One content block: a role plus text parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// "user" or "model"; omitted for the system instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// The text parts of this block.
    pub parts: Vec<Part>,
}

/// A single text part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// The text payload.
    pub text: String,
}

/// Response body of a generateContent call.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates; the first one carries the answer.
    #[serde(default)]
    pub candidates: Vec<ResponseCandidate>,
}

/// One generated candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseCandidate {
    /// The generated content, absent when generation was blocked.
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate, if any.
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        if content.parts.is_empty() {
            return None;
        }
        Some(
            content
                .parts
                .iter()
                .map(|part| part.text.as_str())
                .collect::<String>(),
        )
    }
}
