// src/utils/mod.rs
pub mod error;
pub mod logging;

pub use error::{AppError, ConfigError, ExtractError, StorageError}; // Re-export error types for convenience
