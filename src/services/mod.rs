mod error;
mod local_disk_storage;

pub use error::StorageError;
pub use local_disk_storage::LocalDiskStorageService;

use std::sync::Arc;

use crate::{application::services::StorageService, domain::config::server::ServerConfig};

pub async fn create_storage_service(
    config: &ServerConfig,
) -> Result<Arc<dyn StorageService>, StorageError> {
    let service = LocalDiskStorageService::new(&config.upload_dir).await?;
    Ok(Arc::new(service))
}
