//! Extraction data types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque document info as produced by an extractor
pub type InfoMap = Map<String, Value>;

/// Text and metadata extracted from one uploaded PDF
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedPdf {
    /// Plain text of the whole document (may be empty)
    pub text: String,
    /// Document info, shape owned by the extractor
    pub info: InfoMap,
    /// Page count, 0 when the info has none
    pub numpages: u64,
}

impl ParsedPdf {
    /// Assemble a result, reading the page count out of the info object.
    pub fn new(text: Option<String>, info: InfoMap) -> Self {
        let numpages = info.get("total").and_then(Value::as_u64).unwrap_or(0);
        Self {
            text: text.unwrap_or_default(),
            info,
            numpages,
        }
    }
}

/// Options for info extraction
#[derive(Debug, Clone, Copy, Default)]
pub struct InfoOptions {
    /// Include per-page dimensions
    pub parse_page_info: bool,
}

/// Info produced by the lopdf-backed extractor
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    /// Total page count
    pub total: u64,
    /// Header version, e.g. "1.7"
    pub pdf_version: String,
    pub is_encrypted: bool,
    /// Document information dictionary (Title, Author, ...)
    pub info: InfoMap,
    /// Per-page dimensions, only when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<PageInfo>>,
}

/// Dimensions of a single page in points (72 points = 1 inch)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// 1-based page number
    pub page_number: u32,
    pub width: f64,
    pub height: f64,
}

impl DocumentInfo {
    pub fn into_map(self) -> InfoMap {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => InfoMap::new(),
        }
    }
}
