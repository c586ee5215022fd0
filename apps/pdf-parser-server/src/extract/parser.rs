//! PDF extraction using lopdf and pdf-extract
//!
//! Text comes from `pdf-extract`, which handles font encodings and
//! ToUnicode maps. Document structure (info dictionary, page tree) is
//! read directly with `lopdf`.

use async_trait::async_trait;
use axum::body::Bytes;
use lopdf::{Dictionary, Document, Object, ObjectId};

use super::error::{ExtractError, Result};
use super::traits::PdfExtractor;
use super::types::{DocumentInfo, InfoMap, InfoOptions, PageInfo};

/// Parent chains deeper than this are treated as broken
const MAX_PAGE_TREE_DEPTH: usize = 32;

/// Default extractor backed by `pdf-extract` (text) and `lopdf` (info)
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PdfExtractor for LopdfExtractor {
    async fn extract_text(&self, data: Bytes) -> Result<String> {
        if data.is_empty() {
            return Err(ExtractError::EmptyFile);
        }

        // pdf-extract is CPU-bound and may panic on malformed fonts
        tokio::task::spawn_blocking(move || extract_text_blocking(&data)).await?
    }

    async fn extract_info(&self, data: Bytes, options: InfoOptions) -> Result<InfoMap> {
        if data.is_empty() {
            return Err(ExtractError::EmptyFile);
        }

        tokio::task::spawn_blocking(move || read_document_info(&data, options))
            .await?
            .map(DocumentInfo::into_map)
    }
}

fn extract_text_blocking(data: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(data)?;
    tracing::debug!("Extracted {} chars of text", text.len());
    Ok(text)
}

/// Load a document and collect its info, optionally with page dimensions.
pub fn read_document_info(data: &[u8], options: InfoOptions) -> Result<DocumentInfo> {
    if data.is_empty() {
        return Err(ExtractError::EmptyFile);
    }

    let doc = Document::load_mem(data)?;
    let pages = doc.get_pages();

    let page_info = options.parse_page_info.then(|| {
        pages
            .iter()
            .map(|(&page_number, &page_id)| {
                let (width, height) = page_size(&doc, page_id).unwrap_or((0.0, 0.0));
                PageInfo {
                    page_number,
                    width,
                    height,
                }
            })
            .collect()
    });

    Ok(DocumentInfo {
        total: pages.len() as u64,
        pdf_version: doc.version.clone(),
        is_encrypted: doc.is_encrypted(),
        info: info_dictionary(&doc),
        pages: page_info,
    })
}

/// Follow a single indirect reference.
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Scalar entries of the trailer's Info dictionary.
fn info_dictionary(doc: &Document) -> InfoMap {
    let mut map = InfoMap::new();

    let dict = match doc
        .trailer
        .get(b"Info")
        .ok()
        .and_then(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_dict().ok())
    {
        Some(dict) => dict,
        None => return map,
    };

    for (key, value) in dict.iter() {
        let Some(value) = resolve(doc, value).and_then(object_to_json) else {
            continue;
        };
        map.insert(String::from_utf8_lossy(key).into_owned(), value);
    }

    map
}

fn object_to_json(obj: &Object) -> Option<serde_json::Value> {
    use serde_json::Value;

    match obj {
        Object::Boolean(b) => Some(Value::Bool(*b)),
        Object::Integer(i) => Some(Value::from(*i)),
        Object::Real(r) => serde_json::Number::from_f64(f64::from(*r)).map(Value::Number),
        Object::Name(name) => Some(Value::String(String::from_utf8_lossy(name).into_owned())),
        Object::String(bytes, _) => Some(Value::String(decode_text_string(bytes))),
        _ => None,
    }
}

/// Decode a PDF text string (UTF-16BE or UTF-8 with BOM, else PDFDocEncoding).
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(rest).into_owned();
    }

    bytes.iter().map(|&b| pdf_doc_char(b)).collect()
}

/// PDFDocEncoding 0x18..=0x1F (spacing diacritics)
const PDF_DOC_LOW: [char; 8] = [
    '\u{02D8}', '\u{02C7}', '\u{02C6}', '\u{02D9}', '\u{02DD}', '\u{02DB}', '\u{02DA}', '\u{02DC}',
];

/// PDFDocEncoding 0x80..=0xA0 (typographic punctuation, ligatures, Euro)
const PDF_DOC_HIGH: [char; 33] = [
    '\u{2022}', '\u{2020}', '\u{2021}', '\u{2026}', '\u{2014}', '\u{2013}', '\u{0192}', '\u{2044}',
    '\u{2039}', '\u{203A}', '\u{2212}', '\u{2030}', '\u{201E}', '\u{201C}', '\u{201D}', '\u{2018}',
    '\u{2019}', '\u{201A}', '\u{2122}', '\u{FB01}', '\u{FB02}', '\u{0141}', '\u{0152}', '\u{0160}',
    '\u{0178}', '\u{017D}', '\u{0131}', '\u{0142}', '\u{0153}', '\u{0161}', '\u{017E}', '\u{FFFD}',
    '\u{20AC}',
];

/// Map one PDFDocEncoding byte; outside the tables it agrees with Latin-1.
fn pdf_doc_char(b: u8) -> char {
    match b {
        0x18..=0x1F => PDF_DOC_LOW[usize::from(b - 0x18)],
        0x80..=0xA0 => PDF_DOC_HIGH[usize::from(b - 0x80)],
        0xAD => '\u{FFFD}',
        _ => char::from(b),
    }
}

/// Page width and height from the (possibly inherited) MediaBox.
fn page_size(doc: &Document, page_id: ObjectId) -> Option<(f64, f64)> {
    let media_box = inherited_attribute(doc, page_id, b"MediaBox")?;
    let coords: Vec<f64> = resolve(doc, media_box)?
        .as_array()
        .ok()?
        .iter()
        .filter_map(|o| resolve(doc, o).and_then(as_number))
        .collect();

    match coords.as_slice() {
        [x1, y1, x2, y2] => Some(((x2 - x1).abs(), (y2 - y1).abs())),
        _ => None,
    }
}

fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node: &Dictionary = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").ok()?.as_reference().ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }

    None
}

fn as_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}
