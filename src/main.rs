mod adapters;
mod application;
mod domain;
mod services;

use std::sync::Arc;

use adapters::{
    repositories::{connect_pool, SqliteFileRepository},
    router::build_router,
    state::AppState,
};
use application::repositories::file_repository::FileRepository;
use domain::config::server::ServerConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env().expect("ERROR: invalid server configuration");

    tracing::info!(
        "Starting filedrop-service (uploads in {}, max upload {} bytes)",
        config.upload_dir.display(),
        config.max_upload_size
    );

    tracing::info!("Connecting to database...");
    let pool = connect_pool(&config.database_url).await.expect(
        "ERROR: Failed to open the SQLite database. Check DATABASE_URL and file permissions.",
    );

    let file_repository = SqliteFileRepository::new(pool);
    file_repository
        .init_schema()
        .await
        .expect("ERROR: Failed to create the files table");
    tracing::info!("Database ready");

    let storage_service = services::create_storage_service(&config)
        .await
        .expect("ERROR: Failed to prepare the upload directory");

    let listen_address = config.listen_address();

    let app_state = AppState {
        config: Arc::new(config),
        file_repository: Arc::new(file_repository) as Arc<dyn FileRepository>,
        storage_service,
    };

    let router = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&listen_address)
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on {}", listen_address);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
