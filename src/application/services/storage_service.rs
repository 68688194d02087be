use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::models::file::{FileData, StoredFile},
};

#[async_trait]
pub trait StorageService: Send + Sync {
    async fn upload(
        &self,
        stored_name: &str,
        file_data: &FileData,
    ) -> Result<StoredFile, ApplicationError>;
    async fn download(&self, path: &str) -> Result<Vec<u8>, ApplicationError>;
    async fn delete(&self, path: &str) -> Result<(), ApplicationError>;
}
