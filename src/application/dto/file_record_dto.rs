use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::file_record::FileRecord;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileRecordDTO {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    pub path: Option<String>,
    pub size: Option<u64>,
    pub upload_date: Option<DateTime<Utc>>,
    pub extension: Option<String>,
}

impl From<FileRecord> for FileRecordDTO {
    fn from(value: FileRecord) -> Self {
        FileRecordDTO {
            id: value.id,
            name: Some(value.name),
            path: Some(value.path),
            size: Some(value.size),
            upload_date: Some(value.upload_date),
            extension: Some(value.extension),
        }
    }
}

impl From<FileRecordDTO> for FileRecord {
    fn from(value: FileRecordDTO) -> Self {
        FileRecord {
            id: value.id,
            name: value.name.unwrap_or_default(),
            path: value.path.unwrap_or_default(),
            size: value.size.unwrap_or(0),
            upload_date: value.upload_date.unwrap_or_else(Utc::now),
            extension: value.extension.unwrap_or_default(),
        }
    }
}
