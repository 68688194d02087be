/// An uploaded payload as received from the client.
#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Vec<u8>,
    pub filename: String,
}

impl FileData {
    pub fn new(content: Vec<u8>, filename: String) -> Self {
        Self { content, filename }
    }

    pub fn validate_size(&self, max_size: u64) -> bool {
        self.size() <= max_size
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn extension(&self) -> String {
        extension_of(&self.filename)
    }
}

/// Where the storage backend put a payload.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub path: String,
    pub size: u64,
}

/// Lowercased text after the last `.` of the final path component, dot
/// included. Dotfiles such as `.env` have no extension.
pub fn extension_of(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    match base.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) => base[idx..].to_lowercase(),
    }
}
