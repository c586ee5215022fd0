//! Error types for the upload endpoint

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::extract::ExtractError;

/// Message returned when an extraction failure carries no description
pub const UNKNOWN_FAILURE_MESSAGE: &str = "Failed to process PDF due to an unknown error.";

/// Message returned when the request has no `file` field
pub const MISSING_FILE_MESSAGE: &str = "No PDF file shared.";

/// Upload handler error type
#[derive(Error, Debug)]
pub enum UploadError {
    /// No field named `file`; `body` echoes the text fields that did arrive
    #[error("{}", MISSING_FILE_MESSAGE)]
    MissingFile { body: String },

    #[error("{0}")]
    Extraction(String),

    #[error("{}", UNKNOWN_FAILURE_MESSAGE)]
    Unknown,

    #[error("File exceeds the {limit} byte upload limit")]
    FileTooLarge { limit: usize },

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),
}

impl UploadError {
    pub fn from_extract(err: ExtractError) -> Self {
        match err.description() {
            Some(message) => UploadError::Extraction(message),
            None => UploadError::Unknown,
        }
    }
}

/// JSON error envelope
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    success: bool,
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let (status, error, body) = match self {
            UploadError::MissingFile { body } => {
                (StatusCode::BAD_REQUEST, MISSING_FILE_MESSAGE.to_string(), Some(body))
            }
            UploadError::Extraction(message) => (StatusCode::INTERNAL_SERVER_ERROR, message, None),
            err @ UploadError::Unknown => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None),
            // Transport rejections: plain text, no envelope
            err @ UploadError::FileTooLarge { .. } => {
                return (StatusCode::PAYLOAD_TOO_LARGE, err.to_string()).into_response();
            }
            UploadError::Multipart(e) => {
                tracing::warn!("Rejecting malformed upload: {}", e);
                return e.into_response();
            }
        };

        (
            status,
            Json(ErrorResponse {
                error,
                body,
                success: false,
            }),
        )
            .into_response()
    }
}
