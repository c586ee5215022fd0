#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use axum_test::TestServer;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde_json::json;

use pdf_parser_server::config::Config;
use pdf_parser_server::extract::{ExtractError, InfoMap, InfoOptions, PdfExtractor};
use pdf_parser_server::{router, AppState};

/// Canned extractor that records how often it was called
pub struct StubExtractor {
    outcome: Outcome,
    calls: AtomicUsize,
}

enum Outcome {
    Success { text: String, info: InfoMap },
    Failure(fn() -> ExtractError),
}

impl StubExtractor {
    pub fn succeeding(text: &str, total: u64) -> Arc<Self> {
        let info = json!({ "total": total, "info": { "Title": "Stub" } })
            .as_object()
            .cloned()
            .unwrap();
        Self::with_info(text, info)
    }

    pub fn with_info(text: &str, info: InfoMap) -> Arc<Self> {
        Arc::new(Self {
            outcome: Outcome::Success {
                text: text.to_string(),
                info,
            },
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(err: fn() -> ExtractError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Outcome::Failure(err),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PdfExtractor for StubExtractor {
    async fn extract_text(&self, _data: Bytes) -> Result<String, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Success { text, .. } => Ok(text.clone()),
            Outcome::Failure(err) => Err(err()),
        }
    }

    async fn extract_info(&self, _data: Bytes, _options: InfoOptions) -> Result<InfoMap, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Success { info, .. } => Ok(info.clone()),
            Outcome::Failure(err) => Err(err()),
        }
    }
}

pub fn server_with(config: Config, extractor: Arc<dyn PdfExtractor>) -> TestServer {
    let app = router(AppState::with_extractor(config, extractor));
    TestServer::new(app).unwrap()
}

pub fn stub_server(extractor: Arc<StubExtractor>) -> TestServer {
    server_with(Config::default(), extractor)
}

pub fn real_server() -> TestServer {
    TestServer::new(router(AppState::new(Config::default()))).unwrap()
}

/// A single-page Letter-sized PDF with one line of Helvetica text and a title
pub fn sample_pdf(text: &str) -> Vec<u8> {
    single_page_pdf(text, "F1", true)
}

/// Same layout, but the text is set in `/F9`, which no Resources dictionary defines
pub fn pdf_with_undefined_font(text: &str) -> Vec<u8> {
    single_page_pdf(text, "F9", false)
}

fn single_page_pdf(text: &str, font_name: &str, with_resources: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font_name.into(), 18.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let media_box: Vec<Object> = vec![0.into(), 0.into(), 612.into(), 792.into()];
    let kids: Vec<Object> = vec![page_id.into()];
    let mut pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => 1,
        "MediaBox" => media_box,
    };
    if with_resources {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { font_name => font_id },
        });
        pages.set("Resources", resources_id);
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Test Upload"),
        "Producer" => Object::string_literal("lopdf"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
