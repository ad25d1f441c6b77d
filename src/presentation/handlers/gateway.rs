use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::services::{GatewayError, GatewayOutcome};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::wire::{DetectionResponse, FailureResponse, GatewayRequest, TranscriptionResponse};

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(FailureResponse::new(self.to_string()))).into_response()
    }
}

#[tracing::instrument(skip_all)]
pub async fn gateway_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let request = match parse_request(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected unparseable request body");
            return e.into_response();
        }
    };

    if let Some(transcript) = request.transcription.as_deref() {
        tracing::debug!(transcript = %sanitize_prompt(transcript), "Received transcription");
    }

    match state.gateway.handle(request.into()).await {
        Ok(GatewayOutcome::Detection(result)) => {
            tracing::info!(
                objects = result.objects.len(),
                provider = %result.provider,
                "Detection succeeded"
            );
            (StatusCode::OK, Json(DetectionResponse::from(result))).into_response()
        }
        Ok(GatewayOutcome::Transcription(transcript)) => {
            tracing::info!(
                corrections = transcript.corrections.len(),
                knowledge_categories = transcript.knowledge_used.len(),
                "Transcription sanitized"
            );
            (StatusCode::OK, Json(TranscriptionResponse::from(transcript))).into_response()
        }
        Err(e) => {
            if e.is_client_error() {
                tracing::warn!(error = %e, "Gateway request rejected");
            } else {
                tracing::error!(error = %e, "Gateway request failed");
            }
            e.into_response()
        }
    }
}

/// Parses the body as JSON whatever the declared content type, so simple
/// CORS clients posting `text/plain` are accepted.
fn parse_request(body: Result<Bytes, BytesRejection>) -> Result<GatewayRequest, GatewayError> {
    let bytes = body.map_err(|rejection| {
        GatewayError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;
    serde_json::from_slice(&bytes)
        .map_err(|e| GatewayError::Validation(format!("Invalid request body: {e}")))
}

pub async fn method_not_allowed_handler() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(FailureResponse::new("Method not allowed. Use POST.")),
    )
        .into_response()
}
