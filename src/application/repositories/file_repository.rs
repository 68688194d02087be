use async_trait::async_trait;

use crate::{
    application::{dto::file_record_dto::FileRecordDTO, error::ApplicationError},
    domain::models::file_record::FileRecord,
};

/// Persistent id → metadata mapping. Records are write-once: there is no
/// update or delete.
#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn insert(&self, record: FileRecordDTO) -> Result<FileRecord, ApplicationError>;
    async fn get_by_id(&self, id: &str) -> Result<FileRecord, ApplicationError>;
    async fn count(&self) -> Result<u64, ApplicationError>;
}
