use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;
use crate::resume::normalizer::ResponseFormatError;
use crate::resume::schema::SchemaValidationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Each pipeline failure keeps its own variant and `code`, so callers can tell
/// bad input apart from upstream model trouble.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Upload too large: {0}")]
    UploadTooLarge(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Failed to extract text from PDF.")]
    EmptyText,

    #[error("Extracted text is {chars} characters; the limit is {limit}")]
    InputTooLarge { chars: usize, limit: usize },

    #[error("Error processing resume: model invocation failed: {0}")]
    ModelInvocation(#[from] LlmError),

    #[error("Error processing resume: {0}")]
    ResponseFormat(#[from] ResponseFormatError),

    #[error("Error processing resume: {0}")]
    SchemaValidation(#[from] SchemaValidationError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::EmptyText => StatusCode::BAD_REQUEST,
            AppError::UnprocessableEntity(_) | AppError::InputTooLarge { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::UploadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Extraction(_)
            | AppError::ModelInvocation(_)
            | AppError::ResponseFormat(_)
            | AppError::SchemaValidation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::UnprocessableEntity(_) => "UNPROCESSABLE_ENTITY",
            AppError::UploadTooLarge(_) => "UPLOAD_TOO_LARGE",
            AppError::Extraction(_) => "EXTRACTION_ERROR",
            AppError::EmptyText => "EMPTY_TEXT",
            AppError::InputTooLarge { .. } => "INPUT_TOO_LARGE",
            AppError::ModelInvocation(_) => "MODEL_INVOCATION_ERROR",
            AppError::ResponseFormat(_) => "RESPONSE_FORMAT_ERROR",
            AppError::SchemaValidation(_) => "SCHEMA_VALIDATION_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        if status.is_server_error() {
            tracing::error!("{code}: {self:?}");
        } else {
            tracing::warn!("{code}: {self}");
        }

        let body = Json(json!({
            "detail": self.to_string(),
            "code": code,
        }));

        (status, body).into_response()
    }
}
