//! Error handling for the co-apply toolkit

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoApplyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Library error: {0}")]
    Library(String),
}

pub type Result<T> = std::result::Result<T, CoApplyError>;
