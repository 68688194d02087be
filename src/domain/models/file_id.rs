use std::fmt;

use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

/// Number of random bytes behind every identifier.
pub const FILE_ID_BYTES: usize = 16;

/// Public identifier of an uploaded file.
///
/// The token is drawn from the operating system's CSPRNG and hex encoded, so
/// it never carries anything derived from the request or the file itself. It
/// doubles as the stem of the stored filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn generate() -> Self {
        let mut bytes = [0u8; FILE_ID_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Accepts only the exact shape produced by [`FileId::generate`].
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == FILE_ID_BYTES * 2
            && raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));

        well_formed.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn stored_name(&self, extension: &str) -> String {
        format!("{}{}", self.0, extension)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
