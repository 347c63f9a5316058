use std::io;

use thiserror::Error;

use crate::core::RecordId;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Resume not found: {0}")]
    RecordNotFound(RecordId),

    #[error("Invalid resume: {0}")]
    InvalidRecord(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

pub type Result<T> = std::result::Result<T, ScoutError>;
