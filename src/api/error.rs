//! HTTP error payloads.
//!
//! Every terminal orchestrator error maps to a distinct, stable kind string
//! so callers can dispatch on the failure class instead of parsing prose.
//! Infrastructure faults are 503, backend contract problems are 502, and
//! exhausted retries are 422: the artifact is the problem there, not the
//! service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::services::OrchestratorError;

/// An error response with a stable machine-readable kind.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ApiError {
    /// A 400 for requests that fail input validation.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "invalid_request",
            message: message.into(),
        }
    }
}

impl From<OrchestratorError> for ApiError {
    fn from(err: OrchestratorError) -> Self {
        let status = match &err {
            OrchestratorError::TransportUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            OrchestratorError::MalformedResponse { .. }
            | OrchestratorError::ContractViolation { .. }
            | OrchestratorError::UnknownResponseType { .. } => StatusCode::BAD_GATEWAY,
            OrchestratorError::VerificationExhausted { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };

        let message = match &err {
            // Exhaustion carries the last diagnostic for the caller.
            OrchestratorError::VerificationExhausted {
                attempts,
                last_details,
            } if !last_details.is_empty() => {
                format!("no syntactically valid code after {attempts} attempts; last verifier diagnostic: {last_details}")
            }
            other => other.to_string(),
        };

        Self {
            status,
            kind: err.kind(),
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "kind": self.kind,
                "message": self.message,
            }
        }));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::Collaborator;

    #[test]
    fn exhaustion_maps_to_422_with_diagnostic() {
        let err = OrchestratorError::VerificationExhausted {
            attempts: 2,
            last_details: "line 1: unexpected token".to_string(),
        };
        let api: ApiError = err.into();
        assert_eq!(api.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api.kind, "verification_exhausted");
        assert!(api.message.contains("line 1: unexpected token"));
    }

    #[test]
    fn transport_faults_map_to_503() {
        let err = OrchestratorError::TransportUnavailable {
            collaborator: Collaborator::Verifier,
            reason: "connection refused".to_string(),
        };
        let api: ApiError = err.into();
        assert_eq!(api.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(api.kind, "transport_unavailable");
    }

    #[test]
    fn contract_drift_maps_to_502() {
        let err = OrchestratorError::UnknownResponseType {
            kind: "ladder_logic".to_string(),
        };
        let api: ApiError = err.into();
        assert_eq!(api.status, StatusCode::BAD_GATEWAY);
        assert_eq!(api.kind, "unknown_response_type");
    }
}
