//! Extraction error types

use thiserror::Error;

/// Failure raised by a [`PdfExtractor`](super::PdfExtractor)
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Zero-length upload
    #[error("PDF file is empty")]
    EmptyFile,

    /// The bytes are not a loadable PDF
    #[error("Invalid PDF structure: {0}")]
    InvalidPdf(String),

    /// The document loaded but its text layer could not be read
    #[error("Text extraction error: {0}")]
    TextExtraction(String),

    /// The extraction task died without reporting a reason (panic, cancelled task)
    #[error("extraction aborted")]
    Aborted,
}

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

impl ExtractError {
    /// Human-readable description, if the failure carries one.
    pub fn description(&self) -> Option<String> {
        match self {
            ExtractError::Aborted => None,
            ExtractError::InvalidPdf(msg) | ExtractError::TextExtraction(msg)
                if msg.trim().is_empty() =>
            {
                None
            }
            other => Some(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for ExtractError {
    fn from(err: tokio::task::JoinError) -> Self {
        tracing::error!("Extraction task failed: {}", err);
        ExtractError::Aborted
    }
}

impl From<lopdf::Error> for ExtractError {
    fn from(err: lopdf::Error) -> Self {
        ExtractError::InvalidPdf(err.to_string())
    }
}

impl From<pdf_extract::OutputError> for ExtractError {
    fn from(err: pdf_extract::OutputError) -> Self {
        ExtractError::TextExtraction(err.to_string())
    }
}
