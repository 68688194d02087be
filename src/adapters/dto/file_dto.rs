use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UploadFileResponse {
    pub url: String,
}
