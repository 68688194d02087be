use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{sqlite::SqliteRow, FromRow, Row};

use crate::application::dto::file_record_dto::FileRecordDTO;

impl FromRow<'_, SqliteRow> for FileRecordDTO {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let size: i64 = row.try_get("size")?;
        let upload_date: Option<String> = row.try_get("upload_date")?;
        let upload_date = upload_date
            .map(|raw| {
                DateTime::parse_from_rfc3339(&raw)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| sqlx::Error::ColumnDecode {
                        index: "upload_date".to_string(),
                        source: Box::new(e),
                    })
            })
            .transpose()?;

        Ok(FileRecordDTO {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            path: row.try_get("path")?,
            size: Some(size.max(0) as u64),
            upload_date,
            extension: row.try_get("extension")?,
        })
    }
}

impl FileRecordDTO {
    pub fn sanitize(&mut self) {
        if let Some(size) = self.size {
            self.size = Some(std::cmp::min(size, i64::MAX as u64));
        }
        if let Some(extension) = self.extension.take() {
            self.extension = Some(extension.to_lowercase());
        }
    }
}

/// ISO-8601 form stored in the `upload_date` column.
pub fn format_upload_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}
