use std::{io, path::PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::models::file::{FileData, StoredFile},
    services::error::StorageError,
};

/// Keeps uploaded payloads as flat files under a single directory.
pub struct LocalDiskStorageService {
    root: PathBuf,
}

impl LocalDiskStorageService {
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        info!("Local storage ready at {}", root.display());
        Ok(Self { root })
    }

    fn resolve(&self, stored_name: &str) -> Result<PathBuf, StorageError> {
        let flat = !stored_name.is_empty()
            && !stored_name.contains(['/', '\\'])
            && !stored_name.contains("..")
            && stored_name != ".";

        if !flat {
            return Err(StorageError::InvalidName(stored_name.to_string()));
        }

        Ok(self.root.join(stored_name))
    }
}

#[async_trait]
impl StorageService for LocalDiskStorageService {
    async fn upload(
        &self,
        stored_name: &str,
        file_data: &FileData,
    ) -> Result<StoredFile, ApplicationError> {
        let target = self.resolve(stored_name)?;

        if let Err(e) = fs::write(&target, &file_data.content).await {
            if let Err(cleanup) = fs::remove_file(&target).await {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    warn!(
                        "Could not remove partial file {}: {}",
                        target.display(),
                        cleanup
                    );
                }
            }
            return Err(StorageError::from(e).into());
        }

        debug!("Wrote {} bytes to {}", file_data.size(), target.display());

        Ok(StoredFile {
            path: target.to_string_lossy().into_owned(),
            size: file_data.size(),
        })
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>, ApplicationError> {
        let bytes = fs::read(path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(path.to_string()),
            _ => StorageError::Io(e),
        })?;

        Ok(bytes)
    }

    async fn delete(&self, path: &str) -> Result<(), ApplicationError> {
        fs::remove_file(path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(path.to_string()),
            _ => StorageError::Io(e),
        })?;

        Ok(())
    }
}
