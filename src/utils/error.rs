// src/utils/error.rs
use thiserror::Error;

/// Field-local extraction failures. None of these escape the record assembler;
/// each one turns the affected field into `null`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No nodes matched: {0}")]
    NotFound(String),

    #[error("Malformed value: {0}")]
    MalformedValue(String),

    #[error("Parallel lists differ in length: {lengths:?} (keeping {kept})")]
    LengthMismatch { lengths: Vec<usize>, kept: usize },

    #[error("No identifier of shape '{prefix}#######' in '{input}'")]
    InvalidIdentifierShape { prefix: &'static str, input: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid base URL '{0}': {1}")]
    InvalidBaseUrl(String, url::ParseError),

    #[error("Schema '{schema}' declares field '{field}' more than once")]
    DuplicateField { schema: &'static str, field: &'static str },

    #[error("Could not read page manifest: {0}")]
    Manifest(String),

    #[error("Concurrency must be at least 1")]
    ZeroConcurrency,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Page processing failed: {0}")]
    Processing(String),
}
