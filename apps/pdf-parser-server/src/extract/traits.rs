//! Extractor trait
//!
//! The handler only talks to this seam, so tests and alternative backends
//! can stand in for the lopdf/pdf-extract implementation.

use async_trait::async_trait;
use axum::body::Bytes;

use super::error::Result;
use super::types::{InfoMap, InfoOptions};

/// Text and metadata extraction from raw PDF bytes
#[async_trait]
pub trait PdfExtractor: Send + Sync {
    /// Extract the plain text of the whole document
    async fn extract_text(&self, data: Bytes) -> Result<String>;

    /// Extract document info (page count, info dictionary, optionally page sizes)
    async fn extract_info(&self, data: Bytes, options: InfoOptions) -> Result<InfoMap>;
}
