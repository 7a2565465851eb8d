// src/lib.rs
//! Structured record extraction from fetched movie pages.
//!
//! A crawler hands over one parsed [`Document`] per page; the [`Extractor`]
//! runs the matching schema over it and returns a fully keyed [`Record`] plus
//! follow-up links. Fields that cannot be extracted are `null`, never missing.

pub mod config;
pub mod document;
pub mod extractors;
pub mod followups;
pub mod record;
pub mod runner;
pub mod schemas;
pub mod storage;
pub mod utils;

pub use config::{ExtractorConfig, SubsetOrder, DEFAULT_BASE_URL};
pub use document::{Document, Landmark, Node};
pub use extractors::{Extraction, Extractor};
pub use followups::derive_follow_up_links;
pub use record::{PersonRef, Record, Value};
pub use schemas::PageKind;
pub use utils::{AppError, ConfigError, ExtractError, StorageError};
