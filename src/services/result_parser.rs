//! Decoding of raw generation backend output into a typed [`Candidate`].
//!
//! The backend is contracted to answer with a single JSON object, but in
//! practice it wraps JSON in markdown fences or answers in plain prose.
//! This parser strips the non-semantic wrapping, decodes, and validates the
//! declared shape. It never fails hard: a decode failure becomes a
//! [`ParseFailure`] because the text may still be a legitimate
//! conversational answer that simply was not wrapped in the expected
//! envelope.

use serde_json::Value;

use crate::domain::models::{Candidate, CodeBundle, ParseFailure, ParseFailureReason};

/// Everything one parse attempt can produce.
#[derive(Debug)]
pub enum ParseOutcome {
    /// A well-formed chat or code candidate.
    Candidate(Candidate),
    /// The text did not decode into a valid candidate; may still qualify
    /// for chat fallback on the first round.
    Failure(ParseFailure),
    /// Decoded cleanly but declared a `response_type` outside the contract.
    /// Indicates backend contract drift; never eligible for fallback.
    UnknownResponseType(String),
}

/// Parse raw backend output into a candidate.
pub fn parse_response(raw: &str) -> ParseOutcome {
    let cleaned = strip_code_fences(raw);

    let value: Value = match serde_json::from_str(&cleaned) {
        Ok(value) => value,
        Err(err) => {
            return ParseOutcome::Failure(ParseFailure {
                raw: raw.to_string(),
                reason: ParseFailureReason::Decode(err.to_string()),
            });
        }
    };

    let Some(response_type) = value.get("response_type").and_then(Value::as_str) else {
        return ParseOutcome::Failure(ParseFailure {
            raw: raw.to_string(),
            reason: ParseFailureReason::MissingDiscriminator,
        });
    };

    match response_type {
        "chat" => match value.get("message").and_then(Value::as_str) {
            Some(message) => ParseOutcome::Candidate(Candidate::Chat {
                message: message.to_string(),
            }),
            None => ParseOutcome::Failure(ParseFailure {
                raw: raw.to_string(),
                reason: ParseFailureReason::ContractViolation(
                    "chat response is missing the 'message' field".to_string(),
                ),
            }),
        },
        "plc_code" => match serde_json::from_value::<CodeBundle>(value) {
            Ok(bundle) if !bundle.structured_text.trim().is_empty() => {
                ParseOutcome::Candidate(Candidate::Code(bundle))
            }
            Ok(_) => ParseOutcome::Failure(ParseFailure {
                raw: raw.to_string(),
                reason: ParseFailureReason::ContractViolation(
                    "code response has an empty 'structured_text' field".to_string(),
                ),
            }),
            Err(_) => ParseOutcome::Failure(ParseFailure {
                raw: raw.to_string(),
                reason: ParseFailureReason::ContractViolation(
                    "code response is missing the 'structured_text' field".to_string(),
                ),
            }),
        },
        other => ParseOutcome::UnknownResponseType(other.to_string()),
    }
}

/// Strip markdown code fences from backend output.
///
/// Handles fences with a language tag ("json") and bare fences. Text that
/// is not fenced comes back trimmed but otherwise untouched.
fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();

    if trimmed.starts_with("```") && trimmed.ends_with("```") && trimmed.len() > 6 {
        // Skip the opening fence line (which may carry a language tag).
        let start = trimmed.find('\n').map_or(3, |pos| pos + 1);
        let end = trimmed.rfind("\n```").unwrap_or(trimmed.len() - 3);
        if start <= end {
            return trimmed[start..end].trim().to_string();
        }
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_json(structured_text: &str) -> String {
        serde_json::json!({
            "response_type": "plc_code",
            "explanation": "e",
            "required_variables": "VAR x : BOOL; END_VAR",
            "structured_text": structured_text,
            "verification_notes": "n",
            "simulation_trace": "t"
        })
        .to_string()
    }

    #[test]
    fn parses_plain_chat_json() {
        let outcome = parse_response(r#"{"response_type": "chat", "message": "hello there"}"#);
        match outcome {
            ParseOutcome::Candidate(Candidate::Chat { message }) => {
                assert_eq!(message, "hello there");
            }
            other => panic!("expected chat candidate, got {other:?}"),
        }
    }

    #[test]
    fn parses_code_json_wrapped_in_json_fence() {
        let fenced = format!("```json\n{}\n```", code_json("x := 1;"));
        match parse_response(&fenced) {
            ParseOutcome::Candidate(Candidate::Code(bundle)) => {
                assert_eq!(bundle.structured_text, "x := 1;");
            }
            other => panic!("expected code candidate, got {other:?}"),
        }
    }

    #[test]
    fn parses_code_json_wrapped_in_bare_fence() {
        let fenced = format!("```\n{}\n```", code_json("y := 2;"));
        assert!(matches!(
            parse_response(&fenced),
            ParseOutcome::Candidate(Candidate::Code(_))
        ));
    }

    #[test]
    fn prose_is_a_decode_failure_carrying_the_raw_text() {
        let raw = "Sure! Here is how a motor interlock works...";
        match parse_response(raw) {
            ParseOutcome::Failure(failure) => {
                assert_eq!(failure.raw, raw);
                assert!(matches!(failure.reason, ParseFailureReason::Decode(_)));
            }
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn missing_discriminator_is_a_parse_failure() {
        match parse_response(r#"{"message": "no type here"}"#) {
            ParseOutcome::Failure(failure) => {
                assert_eq!(failure.reason, ParseFailureReason::MissingDiscriminator);
            }
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn code_without_structured_text_is_a_contract_violation() {
        let raw = r#"{"response_type": "plc_code", "explanation": "forgot the code"}"#;
        match parse_response(raw) {
            ParseOutcome::Failure(failure) => {
                assert!(matches!(
                    failure.reason,
                    ParseFailureReason::ContractViolation(_)
                ));
            }
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn code_with_blank_structured_text_is_a_contract_violation() {
        let raw = code_json("   ");
        assert!(matches!(
            parse_response(&raw),
            ParseOutcome::Failure(ParseFailure {
                reason: ParseFailureReason::ContractViolation(_),
                ..
            })
        ));
    }

    #[test]
    fn chat_without_message_is_a_contract_violation() {
        match parse_response(r#"{"response_type": "chat"}"#) {
            ParseOutcome::Failure(failure) => {
                assert!(matches!(
                    failure.reason,
                    ParseFailureReason::ContractViolation(_)
                ));
            }
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn unknown_response_type_is_reported_as_such() {
        match parse_response(r#"{"response_type": "ladder_logic", "rungs": []}"#) {
            ParseOutcome::UnknownResponseType(kind) => assert_eq!(kind, "ladder_logic"),
            other => panic!("expected unknown response type, got {other:?}"),
        }
    }

    #[test]
    fn unfenced_output_is_only_trimmed() {
        let raw = format!("  {}  ", code_json("z := 3;"));
        assert!(matches!(
            parse_response(&raw),
            ParseOutcome::Candidate(Candidate::Code(_))
        ));
    }
}
