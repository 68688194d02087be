mod sqlite_file_repository;

pub use sqlite_file_repository::{connect_pool, SqliteFileRepository};

#[cfg(test)]
pub(crate) use sqlite_file_repository::tests::memory_repository;
