// Background Image Domain Model

use super::error::{DomainError, Result};

/// Upload size limit (5 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Accepted background image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    /// Only `image/png` and `image/jpeg` are accepted
    pub fn from_content_type(content_type: &str) -> Result<Self> {
        match content_type.trim().to_ascii_lowercase().as_str() {
            "image/png" => Ok(ImageKind::Png),
            "image/jpeg" => Ok(ImageKind::Jpeg),
            other => Err(DomainError::UnsupportedImage(format!(
                "{other} (only PNG or JPEG allowed)"
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpg",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
        }
    }

    fn matches(&self, bytes: &[u8]) -> bool {
        match self {
            ImageKind::Png => bytes.starts_with(PNG_MAGIC),
            ImageKind::Jpeg => bytes.starts_with(JPEG_MAGIC),
        }
    }
}

/// Validated image ready to be stored
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    pub kind: ImageKind,
    pub bytes: Vec<u8>,
}

impl BackgroundImage {
    /// Validate declared type, size and file signature
    pub fn new(content_type: &str, bytes: Vec<u8>, max_bytes: usize) -> Result<Self> {
        let kind = ImageKind::from_content_type(content_type)?;

        if bytes.is_empty() {
            return Err(DomainError::ValidationError("No file uploaded".to_string()));
        }
        if bytes.len() > max_bytes {
            return Err(DomainError::ImageTooLarge {
                size: bytes.len(),
                limit: max_bytes,
            });
        }
        if !kind.matches(&bytes) {
            return Err(DomainError::UnsupportedImage(format!(
                "content is not a valid {}",
                kind.content_type()
            )));
        }

        Ok(Self { kind, bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
