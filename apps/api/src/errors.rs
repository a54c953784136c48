use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Render failed: {0}")]
    RenderFailed(String),

    #[error("Render timed out after {0}s")]
    RenderTimeout(u64),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<RenderError> for AppError {
    fn from(error: RenderError) -> Self {
        match error {
            RenderError::Renderer(message) => AppError::RenderFailed(message),
            RenderError::Timeout(secs) => AppError::RenderTimeout(secs),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, remediation) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg.clone(),
                Some("Upload a PDF, DOCX, or DOC file."),
            ),
            AppError::Extraction(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                e.category.code(),
                e.message.clone(),
                Some(e.remediation()),
            ),
            AppError::RenderFailed(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_FAILED",
                    "The document could not be produced".to_string(),
                    Some("Shorten unusually long sections and try again."),
                )
            }
            AppError::RenderTimeout(secs) => {
                tracing::warn!("Render timed out after {secs}s");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "RENDER_TIMEOUT",
                    format!("Rendering took longer than {secs}s"),
                    Some("Try again in a moment. If it keeps happening, trim the resume content."),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(remediation) = remediation {
            error["remediation"] = json!(remediation);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
