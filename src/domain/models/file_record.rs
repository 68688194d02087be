use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::file_kind::FileKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub path: String,
    pub size: u64,
    pub upload_date: DateTime<Utc>,
    pub extension: String,
}

impl FileRecord {
    pub fn kind(&self) -> FileKind {
        FileKind::classify(&self.extension)
    }

    /// Size in kilobytes, rounded half up.
    pub fn size_kb(&self) -> u64 {
        self.size.saturating_add(512) / 1024
    }
}
