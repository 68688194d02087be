use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::domain::models::{file_kind::FileKind, file_record::FileRecord};

/// Server-rendered summary of one stored file. Askama escapes every
/// interpolated value, so client-supplied names are safe to embed.
#[derive(Template)]
#[template(path = "file_details.html")]
pub struct FileDetailsTemplate {
    pub id: String,
    pub name: String,
    pub size_kb: u64,
    pub upload_date: String,
    pub extension: String,
    pub file_type: FileKind,
    pub previewable: bool,
}

impl From<&FileRecord> for FileDetailsTemplate {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            size_kb: record.size_kb(),
            upload_date: record.upload_date.format("%Y-%m-%d").to_string(),
            extension: record.extension.clone(),
            file_type: record.kind(),
            previewable: FileKind::is_previewable(&record.extension),
        }
    }
}

impl IntoResponse for FileDetailsTemplate {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!("template render failed, err={}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to render file details",
                )
                    .into_response()
            }
        }
    }
}
