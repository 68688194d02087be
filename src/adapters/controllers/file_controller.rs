use axum::{
    body::Body,
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::file_dto::UploadFileResponse, state::AppState,
        views::file_details::FileDetailsTemplate,
    },
    application::{dto::file_record_dto::FileRecordDTO, error::ApplicationError},
    domain::models::{file::FileData, file_id::FileId},
};

pub struct FileController;

impl FileController {
    /// Stores the `file` field and records its metadata.
    /// POST /upload
    /// Form: `file` (required), `fileName` (optional display name)
    pub async fn upload_file(
        State(app_state): State<AppState>,
        mut multipart: Multipart,
    ) -> Result<Json<UploadFileResponse>, ApplicationError> {
        let mut file_data: Option<FileData> = None;
        let mut display_name: Option<String> = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "file" => {
                    // A part without a filename is a plain form value, not a file.
                    let Some(filename) = field.file_name().map(str::to_string) else {
                        warn!("Ignoring 'file' part without a filename");
                        continue;
                    };
                    let content = field.bytes().await.map_err(multipart_error)?;

                    // Browsers send an empty part when no file was picked.
                    if filename.is_empty() && content.is_empty() {
                        continue;
                    }
                    file_data = Some(FileData::new(content.to_vec(), filename));
                }
                "fileName" => {
                    display_name = Some(field.text().await.map_err(multipart_error)?);
                }
                _ => {}
            }
        }

        let file_data = file_data.ok_or_else(|| {
            warn!("Missing required 'file' field in upload");
            ApplicationError::NoFileProvided
        })?;

        if !file_data.validate_size(app_state.config.max_upload_size) {
            return Err(ApplicationError::PayloadTooLarge);
        }

        let name = display_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| file_data.filename.clone());
        let extension = file_data.extension();
        let file_id = FileId::generate();

        let stored = app_state
            .storage_service
            .upload(&file_id.stored_name(&extension), &file_data)
            .await?;

        let record_dto = FileRecordDTO {
            id: file_id.to_string(),
            name: Some(name),
            path: Some(stored.path.clone()),
            size: Some(stored.size),
            upload_date: Some(Utc::now()),
            extension: Some(extension),
        };

        let record = match app_state.file_repository.insert(record_dto).await {
            Ok(record) => record,
            Err(e) => {
                if let Err(cleanup) = app_state.storage_service.delete(&stored.path).await {
                    warn!(
                        "Could not remove {} after failed insert: {:?}",
                        stored.path, cleanup
                    );
                }
                return Err(e);
            }
        };

        info!(
            "Stored file {} ({} bytes, extension '{}')",
            record.id, record.size, record.extension
        );

        Ok(Json(UploadFileResponse {
            url: app_state.config.file_url(&record.id),
        }))
    }

    /// GET /files/{file_id}
    pub async fn download_file(
        State(app_state): State<AppState>,
        Path(file_id): Path<String>,
    ) -> Result<Response, ApplicationError> {
        let file_id = FileId::parse(&file_id).ok_or(ApplicationError::NotFound)?;

        let record = app_state
            .file_repository
            .get_by_id(file_id.as_str())
            .await?;

        let file_bytes = app_state.storage_service.download(&record.path).await?;

        let content_type = mime_guess::from_ext(record.extension.trim_start_matches('.'))
            .first_or_octet_stream();

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type.as_ref())
            .header(header::CONTENT_LENGTH, file_bytes.len())
            .body(Body::from(file_bytes))
            .map_err(|e| ApplicationError::InternalError(e.to_string()))
    }

    /// GET /file/{file_id}
    pub async fn file_details(
        State(app_state): State<AppState>,
        Path(file_id): Path<String>,
    ) -> Result<FileDetailsTemplate, ApplicationError> {
        let file_id = FileId::parse(&file_id).ok_or(ApplicationError::NotFound)?;

        let record = app_state
            .file_repository
            .get_by_id(file_id.as_str())
            .await?;

        Ok(FileDetailsTemplate::from(&record))
    }
}

fn multipart_error(e: MultipartError) -> ApplicationError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApplicationError::PayloadTooLarge;
    }

    warn!("Invalid multipart data: {}", e);
    ApplicationError::BadRequest("Invalid request format".to_string())
}
