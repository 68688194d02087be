#[derive(Debug)]
pub enum ApplicationError {
    NotFound,
    NoFileProvided,
    BadRequest(String),
    PayloadTooLarge,
    StorageError(String),
    DatabaseError(String),
    InternalError(String),
}
