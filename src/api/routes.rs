//! Request handlers.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::{info, Instrument};
use uuid::Uuid;

use super::error::ApiError;
use super::AppState;
use crate::domain::models::{CodeBundle, GenerationRequest, VerificationOutcome};
use crate::services::GenerateOutcome;

/// Wire shape of a successful `/generate` response.
#[derive(Debug, Serialize)]
#[serde(tag = "response_type", rename_all = "snake_case")]
pub enum GenerateResponse {
    /// Conversational reply.
    Chat {
        /// The reply text.
        message: String,
    },
    /// Verified code bundle.
    PlcCode {
        /// The final code artifact.
        final_json: CodeBundle,
        /// The verification outcome that accepted it.
        verification_status: VerificationOutcome,
        /// 1-indexed verification attempts consumed.
        attempts: u32,
    },
}

impl From<GenerateOutcome> for GenerateResponse {
    fn from(outcome: GenerateOutcome) -> Self {
        match outcome {
            GenerateOutcome::Chat { message } => Self::Chat { message },
            GenerateOutcome::Code {
                bundle,
                verification,
                attempts,
            } => Self::PlcCode {
                final_json: bundle,
                verification_status: verification,
                attempts,
            },
        }
    }
}

/// `POST /generate` — drive one request through the orchestrator.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if request.prompt.trim().is_empty() {
        return Err(ApiError::invalid_request("prompt must not be empty"));
    }

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("generate", %request_id);

    let outcome = async {
        info!(prompt_words = request.prompt.split_whitespace().count(), "handling request");
        state.orchestrator.generate(&request).await
    }
    .instrument(span)
    .await?;

    Ok(Json(outcome.into()))
}

/// `GET /health` — liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
