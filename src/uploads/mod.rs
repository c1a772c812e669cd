//! Image uploads: validation, resize and WebP re-encoding, tenant-scoped storage.

pub mod pipeline;
pub mod serve;

use thiserror::Error;

pub use pipeline::{StoredImage, UploadPipeline, UploadRequest};
pub use serve::{content_type_for, resolve_upload_path, IMMUTABLE_CACHE_CONTROL};

pub const SUPPORTED_IMAGE_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/avif"];

#[derive(Debug, Error)]
pub enum UploadError {
    /// Client-facing rejection; the message is shown as-is.
    #[error("{0}")]
    Validation(String),

    #[error("image processing failed: {0}")]
    Processing(String),

    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),
}

/// Target of an upload; decides the bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Hero,
    Generic,
}

impl UploadKind {
    /// `generic` selects the generic box; anything else is a hero image.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("generic") => UploadKind::Generic,
            _ => UploadKind::Hero,
        }
    }

    /// `(max_width, max_height)`
    pub fn bounds(self) -> (u32, u32) {
        match self {
            UploadKind::Hero => (1920, 1080),
            UploadKind::Generic => (1600, 1600),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parsing() {
        assert_eq!(UploadKind::parse(Some("generic")), UploadKind::Generic);
        assert_eq!(UploadKind::parse(Some("hero")), UploadKind::Hero);
        assert_eq!(UploadKind::parse(Some("GENERIC")), UploadKind::Hero);
        assert_eq!(UploadKind::parse(None), UploadKind::Hero);
        assert_eq!(UploadKind::Hero.bounds(), (1920, 1080));
    }
}
