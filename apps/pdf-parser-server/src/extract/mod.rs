//! PDF text and info extraction
//!
//! - `traits`: the `PdfExtractor` seam the upload handler depends on
//! - `parser`: default implementation over `lopdf` and `pdf-extract`
//! - `types`: the parsed result and info shapes
//! - `error`: extraction failures

pub mod error;
pub mod parser;
pub mod traits;
pub mod types;

use axum::body::Bytes;

pub use error::{ExtractError, Result};
pub use parser::LopdfExtractor;
pub use traits::PdfExtractor;
pub use types::{DocumentInfo, InfoMap, InfoOptions, PageInfo, ParsedPdf};

/// Run text and info extraction over one upload and combine the results.
///
/// Each extractor call is made exactly once; the first failure wins.
pub async fn parse_pdf(extractor: &dyn PdfExtractor, data: Bytes) -> Result<ParsedPdf> {
    let text = extractor.extract_text(data.clone()).await?;
    let info = extractor
        .extract_info(data, InfoOptions { parse_page_info: true })
        .await?;

    Ok(ParsedPdf::new(Some(text), info))
}
