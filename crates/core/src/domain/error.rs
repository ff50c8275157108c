// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid time: {0:?}")]
    InvalidTime(String),

    #[error("unsupported image type: {0}")]
    UnsupportedImage(String),

    #[error("image too large: {size} bytes (limit {limit})")]
    ImageTooLarge { size: usize, limit: usize },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
