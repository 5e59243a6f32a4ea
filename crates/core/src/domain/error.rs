// Domain Error Types

use thiserror::Error;

/// Display strings double as the HTTP error bodies, keep them short.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid text")]
    InvalidText,

    #[error("Invalid intent")]
    InvalidIntent,

    #[error("Invalid id")]
    InvalidId,

    #[error("Invalid list id")]
    InvalidListId,
}

pub type Result<T> = std::result::Result<T, DomainError>;
