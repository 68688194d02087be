use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    application::{repositories::file_repository::FileRepository, services::StorageService},
    domain::config::server::ServerConfig,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub file_repository: Arc<dyn FileRepository>,
    pub storage_service: Arc<dyn StorageService>,
}
