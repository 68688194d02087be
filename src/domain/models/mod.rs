pub mod file;
pub mod file_id;
pub mod file_kind;
pub mod file_record;
