//! Error types for rijmhulp
//!
//! The phonetic pipeline itself never fails; only configuration and the
//! storage collaborator can.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RijmError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading or saving persisted state
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid binary snapshot: {0}")]
    Bincode(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, RijmError>;
