use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::adapters::{
    controllers::{file_controller::FileController, health_controller::HealthController},
    state::AppState,
};

/// Room for multipart boundaries, part headers and the `fileName` field on
/// top of the file itself.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

pub fn build_router(app_state: AppState) -> Router {
    let config = app_state.config.clone();
    let body_limit: usize = config
        .max_upload_size
        .saturating_add(MULTIPART_OVERHEAD)
        .try_into()
        .unwrap_or(usize::MAX);

    let cors = match &config.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins: Vec<HeaderValue> = allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin {:?}", origin);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    };

    let mut router = Router::new()
        .route(
            "/upload",
            post(FileController::upload_file).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/files/{file_id}", get(FileController::download_file))
        .route("/file/{file_id}", get(FileController::file_details))
        .route("/health", get(HealthController::health_check));

    if config.public_dir.is_dir() {
        info!("Serving static files from {}", config.public_dir.display());
        router = router.fallback_service(ServeDir::new(&config.public_dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, Bytes},
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use async_trait::async_trait;

    use super::*;
    use crate::{
        adapters::repositories::{memory_repository, SqliteFileRepository},
        application::{
            dto::file_record_dto::FileRecordDTO, error::ApplicationError,
            repositories::file_repository::FileRepository,
        },
        domain::{config::server::ServerConfig, models::file_record::FileRecord},
        services::LocalDiskStorageService,
    };

    const BOUNDARY: &str = "filedrop-test-boundary";

    struct TestApp {
        router: Router,
        repository: Arc<dyn FileRepository>,
        temp_dir: TempDir,
    }

    async fn test_app_with(max_upload_size: u64) -> TestApp {
        let temp_dir = TempDir::new().unwrap();
        let config = ServerConfig {
            upload_dir: temp_dir.path().join("uploads"),
            public_dir: temp_dir.path().join("public"),
            max_upload_size,
            ..ServerConfig::default()
        };

        let repository: Arc<dyn FileRepository> = Arc::new(memory_repository().await);
        let storage = LocalDiskStorageService::new(&config.upload_dir)
            .await
            .unwrap();

        let router = build_router(AppState {
            config: Arc::new(config),
            file_repository: repository.clone(),
            storage_service: Arc::new(storage),
        });

        TestApp {
            router,
            repository,
            temp_dir,
        }
    }

    async fn test_app() -> TestApp {
        test_app_with(80 * 1024 * 1024).await
    }

    enum Part<'a> {
        File(&'a str, &'a [u8]),
        Text(&'a str, &'a str),
    }

    fn multipart_request(parts: &[Part<'_>]) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part {
                Part::File(filename, content) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n",
                            filename
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(content);
                }
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Bytes) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body)
    }

    async fn get_uri(router: &Router, uri: &str) -> (StatusCode, Bytes) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(router, request).await
    }

    async fn upload(router: &Router, parts: &[Part<'_>]) -> String {
        let (status, body) = send(router, multipart_request(parts)).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_slice(&body).unwrap();
        let url = json["url"].as_str().unwrap();
        url.rsplit('/').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn upload_returns_details_url() {
        let app = test_app().await;

        let (status, body) = send(
            &app.router,
            multipart_request(&[Part::File("a.txt", b"0123456789")]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        let url = json["url"].as_str().unwrap();
        assert!(url.starts_with("http://localhost:3000/file/"));

        let id = url.rsplit('/').next().unwrap();
        assert!(id.len() >= 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn uploaded_size_matches_stored_record() {
        let app = test_app().await;
        let payload = vec![7u8; 4321];

        let id = upload(&app.router, &[Part::File("blob.bin", &payload)]).await;
        let record = app.repository.get_by_id(&id).await.unwrap();

        assert_eq!(record.size, 4321);
        assert_eq!(record.name, "blob.bin");
        assert_eq!(record.extension, ".bin");
        assert!(record.path.ends_with(&format!("{}.bin", id)));
        assert!(app
            .temp_dir
            .path()
            .join("uploads")
            .join(format!("{}.bin", id))
            .is_file());
    }

    #[tokio::test]
    async fn download_returns_identical_bytes() {
        let app = test_app().await;
        let payload: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();

        let id = upload(&app.router, &[Part::File("Photo.PNG", &payload)]).await;

        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/files/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "10000");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.len(), payload.len());
        assert_eq!(&body[..], payload.as_slice());
    }

    #[tokio::test]
    async fn missing_file_field_is_rejected_without_record() {
        let app = test_app().await;

        let (status, body) = send(
            &app.router,
            multipart_request(&[Part::Text("fileName", "ghost.txt")]),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "No file uploaded");
        assert_eq!(app.repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_file_part_counts_as_missing() {
        let app = test_app().await;

        let (status, _) = send(&app.router, multipart_request(&[Part::File("", b"")])).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(app.repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn file_part_without_filename_counts_as_missing() {
        let app = test_app().await;

        let (status, body) = send(
            &app.router,
            multipart_request(&[Part::Text("file", "hello")]),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "No file uploaded");
        assert_eq!(app.repository.count().await.unwrap(), 0);
        assert_eq!(
            std::fs::read_dir(app.temp_dir.path().join("uploads"))
                .unwrap()
                .count(),
            0
        );
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let app = test_app_with(16).await;

        let (status, _) = send(
            &app.router,
            multipart_request(&[Part::File("big.bin", &[1u8; 17])]),
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(app.repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn client_file_name_wins_over_original() {
        let app = test_app().await;

        let id = upload(
            &app.router,
            &[
                Part::Text("fileName", "Quarterly report"),
                Part::File("q3.PDF", b"%PDF-1.4"),
            ],
        )
        .await;
        let record = app.repository.get_by_id(&id).await.unwrap();

        assert_eq!(record.name, "Quarterly report");
        assert_eq!(record.extension, ".pdf");
    }

    #[tokio::test]
    async fn blank_file_name_falls_back_to_original() {
        let app = test_app().await;

        let id = upload(
            &app.router,
            &[Part::File("notes.md", b"# hi"), Part::Text("fileName", "")],
        )
        .await;
        let record = app.repository.get_by_id(&id).await.unwrap();

        assert_eq!(record.name, "notes.md");
    }

    #[tokio::test]
    async fn unknown_or_malformed_ids_are_not_found() {
        let app = test_app().await;

        for uri in [
            "/files/00112233445566778899aabbccddeeff",
            "/file/00112233445566778899aabbccddeeff",
            "/files/not-an-id",
            "/file/..%2F..%2Fetc%2Fpasswd",
        ] {
            let (status, _) = get_uri(&app.router, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn details_page_for_small_text_file() {
        let app = test_app().await;

        let id = upload(&app.router, &[Part::File("a.txt", b"0123456789")]).await;
        let (status, body) = get_uri(&app.router, &format!("/file/{}", id)).await;
        let html = String::from_utf8(body.to_vec()).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<strong>Size:</strong> 0 KB"));
        assert!(html.contains("<strong>File Extension:</strong> .txt"));
        assert!(html.contains("<strong>File Type:</strong> Undetermined"));
        assert!(!html.contains("<img"));
        assert!(html.contains(&format!("href=\"/files/{}\"", id)));
    }

    #[tokio::test]
    async fn details_page_escapes_display_name() {
        let app = test_app().await;

        let id = upload(
            &app.router,
            &[
                Part::Text("fileName", "<img src=x onerror=alert(1)>"),
                Part::File("pic.gif", b"GIF89a"),
            ],
        )
        .await;
        let (_, body) = get_uri(&app.router, &format!("/file/{}", id)).await;
        let html = String::from_utf8(body.to_vec()).unwrap();

        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("<img src=x"));
        assert!(html.contains(&format!("<img src=\"/files/{}\"", id)));
    }

    #[tokio::test]
    async fn health_reports_file_count() {
        let app = test_app().await;
        upload(&app.router, &[Part::File("one.txt", b"1")]).await;

        let (status, body) = get_uri(&app.router, "/health").await;
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["fileCount"], 1);
    }

    #[tokio::test]
    async fn static_front_end_is_served_when_present() {
        let temp_dir = TempDir::new().unwrap();
        let public_dir = temp_dir.path().join("public");
        std::fs::create_dir_all(&public_dir).unwrap();
        std::fs::write(public_dir.join("index.html"), "<h1>upload</h1>").unwrap();

        let config = ServerConfig {
            upload_dir: temp_dir.path().join("uploads"),
            public_dir,
            ..ServerConfig::default()
        };
        let storage = LocalDiskStorageService::new(&config.upload_dir)
            .await
            .unwrap();
        let router = build_router(AppState {
            config: Arc::new(config),
            file_repository: Arc::new(memory_repository().await),
            storage_service: Arc::new(storage),
        });

        let (status, body) = get_uri(&router, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"<h1>upload</h1>");
    }

    /// Reads go to a real database, every insert fails.
    struct InsertFailingRepository {
        inner: SqliteFileRepository,
    }

    #[async_trait]
    impl FileRepository for InsertFailingRepository {
        async fn insert(&self, _record: FileRecordDTO) -> Result<FileRecord, ApplicationError> {
            Err(ApplicationError::DatabaseError("disk I/O error".to_string()))
        }

        async fn get_by_id(&self, id: &str) -> Result<FileRecord, ApplicationError> {
            self.inner.get_by_id(id).await
        }

        async fn count(&self) -> Result<u64, ApplicationError> {
            self.inner.count().await
        }
    }

    #[tokio::test]
    async fn failed_insert_removes_written_file() {
        let temp_dir = TempDir::new().unwrap();
        let upload_dir = temp_dir.path().join("uploads");
        let config = ServerConfig {
            upload_dir: upload_dir.clone(),
            public_dir: temp_dir.path().join("public"),
            ..ServerConfig::default()
        };

        let repository: Arc<dyn FileRepository> = Arc::new(InsertFailingRepository {
            inner: memory_repository().await,
        });
        let storage = LocalDiskStorageService::new(&config.upload_dir)
            .await
            .unwrap();
        let router = build_router(AppState {
            config: Arc::new(config),
            file_repository: repository.clone(),
            storage_service: Arc::new(storage),
        });

        let (status, body) = send(
            &router,
            multipart_request(&[Part::File("doomed.txt", b"never indexed")]),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].is_string());
        assert_eq!(std::fs::read_dir(&upload_dir).unwrap().count(), 0);
        assert_eq!(repository.count().await.unwrap(), 0);
    }
}
