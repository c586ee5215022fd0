//! Upload Routes
//!
//! POST /upload - accept a multipart PDF in the `file` field and return its
//! text and document info.

use axum::{
    body::Bytes,
    extract::{
        multipart::{Field, MultipartRejection},
        Multipart, State,
    },
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::UploadError;
use crate::extract::{self, ParsedPdf};
use crate::state::AppState;

/// Name of the multipart field carrying the PDF
pub const FILE_FIELD: &str = "file";

/// Successful upload response
#[derive(Serialize)]
pub struct UploadResponse {
    pub result: ParsedPdf,
    pub success: bool,
}

/// What the multipart stream contained
#[derive(Default)]
struct UploadForm {
    file: Option<Bytes>,
    /// Non-file text fields, echoed back when the file is missing
    fields: Map<String, Value>,
}

/// POST /upload
///
/// Requests that are not multipart at all are treated like multipart
/// requests without a `file` field.
pub async fn upload_pdf(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, UploadError> {
    let upload_id = Uuid::new_v4();
    let max_file_size = state.config().upload.max_file_size;

    let form = match multipart {
        Ok(multipart) => read_form(multipart, max_file_size).await.map_err(|e| {
            tracing::warn!(upload_id = %upload_id, "Upload rejected: {}", e);
            e
        })?,
        // Nothing parses a non-multipart body, so it echoes as an empty field map
        Err(rejection) => {
            tracing::debug!(upload_id = %upload_id, "Not a multipart request: {}", rejection);
            UploadForm::default()
        }
    };

    let Some(data) = form.file else {
        tracing::warn!(upload_id = %upload_id, "No file field found in upload");
        return Err(UploadError::MissingFile {
            body: format!("Body is {}", Value::Object(form.fields)),
        });
    };

    tracing::debug!(upload_id = %upload_id, "Read {} bytes of file data", data.len());

    match extract::parse_pdf(state.extractor(), data).await {
        Ok(result) => {
            tracing::info!(upload_id = %upload_id, result = ?result, "PDF parsed successfully");
            Ok(Json(UploadResponse {
                result,
                success: true,
            }))
        }
        Err(e) => {
            tracing::error!(upload_id = %upload_id, error = ?e, "Error processing PDF: {}", e);
            Err(UploadError::from_extract(e))
        }
    }
}

async fn read_form(mut multipart: Multipart, max_file_size: usize) -> Result<UploadForm, UploadError> {
    let mut form = UploadForm::default();

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        let is_file = field.file_name().is_some();

        tracing::debug!(
            "Received field: name='{}', filename={:?}, content_type={:?}",
            name,
            field.file_name(),
            field.content_type()
        );

        if is_file {
            // Only the first `file` upload is used; other file fields are skipped
            if name == FILE_FIELD && form.file.is_none() {
                form.file = Some(read_file_field(&mut field, max_file_size).await?);
            }
        } else {
            let text = field.text().await?;
            form.fields.insert(name, Value::String(text));
        }
    }

    Ok(form)
}

/// Collect a file field, giving up as soon as it passes `limit` bytes.
async fn read_file_field(field: &mut Field<'_>, limit: usize) -> Result<Bytes, UploadError> {
    let mut buf = Vec::new();

    while let Some(chunk) = field.chunk().await? {
        if buf.len() + chunk.len() > limit {
            return Err(UploadError::FileTooLarge { limit });
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(Bytes::from(buf))
}
