use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use sqlx::{
    query_as,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use tracing::info;

use crate::{
    adapters::dto::file_record_dto::format_upload_date,
    application::{
        dto::file_record_dto::FileRecordDTO, error::ApplicationError,
        repositories::file_repository::FileRepository,
    },
    domain::models::file_record::FileRecord,
};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS files (
        id TEXT PRIMARY KEY,
        name TEXT,
        path TEXT,
        size INTEGER,
        upload_date TEXT,
        extension TEXT
    )
"#;

pub async fn connect_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await
}

pub struct SqliteFileRepository {
    pool: SqlitePool,
}

impl SqliteFileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the `files` table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), ApplicationError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        info!("Database schema initialized");
        Ok(())
    }
}

#[async_trait]
impl FileRepository for SqliteFileRepository {
    async fn insert(&self, record: FileRecordDTO) -> Result<FileRecord, ApplicationError> {
        let mut record = record;
        record.sanitize();

        let query = r#"
            INSERT INTO files (id, name, path, size, upload_date, extension)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
        "#;

        let new_record: FileRecord = record.into();

        let created: FileRecordDTO = query_as::<_, FileRecordDTO>(query)
            .bind(&new_record.id)
            .bind(&new_record.name)
            .bind(&new_record.path)
            .bind(new_record.size as i64)
            .bind(format_upload_date(&new_record.upload_date))
            .bind(&new_record.extension)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(created.into())
    }

    async fn get_by_id(&self, id: &str) -> Result<FileRecord, ApplicationError> {
        let query = "SELECT * FROM files WHERE id = ?";

        let fetched: Option<FileRecordDTO> = query_as::<_, FileRecordDTO>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        fetched.map(Into::into).ok_or(ApplicationError::NotFound)
    }

    async fn count(&self) -> Result<u64, ApplicationError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM files")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(count.max(0) as u64)
    }
}
