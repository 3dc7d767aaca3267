use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domain::TraitKind;
use crate::forest::ForestError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// No model artifact could be loaded at startup. The payload carries the
    /// path and cause for the log; clients get a generic message.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("{0} score must be between 1 and 10")]
    OutOfRange(TraitKind),

    #[error("Prediction failed: {0}")]
    Prediction(#[from] ForestError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::ModelUnavailable(detail) => {
                tracing::warn!("Model unavailable: {detail}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "MODEL_UNAVAILABLE",
                    "Model not loaded properly".to_string(),
                )
            }
            AppError::MalformedInput(msg) => {
                (StatusCode::BAD_REQUEST, "MALFORMED_INPUT", msg.clone())
            }
            AppError::OutOfRange(kind) => (
                StatusCode::BAD_REQUEST,
                "OUT_OF_RANGE",
                format!("{kind} score must be between 1 and 10"),
            ),
            AppError::Prediction(e) => {
                tracing::error!("Prediction failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PREDICTION_FAILED",
                    "Prediction could not be completed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
