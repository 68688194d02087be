use std::fmt;

use serde::Serialize;

const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg"];
const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx"];
const FONT_EXTENSIONS: &[&str] = &[".woff2", ".woff", ".otf", ".ttf", ".eot"];

// SVG is classified as an image but never embedded inline.
const PREVIEW_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp"];

/// Coarse category of a stored file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileKind {
    Image,
    Document,
    Font,
    Undetermined,
}

impl FileKind {
    pub fn classify(extension: &str) -> Self {
        let extension = extension.to_ascii_lowercase();
        let extension = extension.as_str();

        if IMAGE_EXTENSIONS.contains(&extension) {
            FileKind::Image
        } else if DOCUMENT_EXTENSIONS.contains(&extension) {
            FileKind::Document
        } else if FONT_EXTENSIONS.contains(&extension) {
            FileKind::Font
        } else {
            FileKind::Undetermined
        }
    }

    pub fn is_previewable(extension: &str) -> bool {
        PREVIEW_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Image => "Image",
            FileKind::Document => "Document",
            FileKind::Font => "Font",
            FileKind::Undetermined => "Undetermined",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
