// src/storage/mod.rs
use crate::extractors::Extraction;
use crate::record::Record;
use crate::utils::error::StorageError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const FOLLOW_UPS_FILE: &str = "follow_ups.txt";

/// What lands on disk for each page: the record plus where and when it came from.
#[derive(Serialize)]
struct RecordEnvelope<'a> {
    source_url: &'a str,
    schema: &'static str,
    extracted_at: String,
    record: &'a Record,
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Saves one record as JSON under `<base>/<schema>/<imdb_id>.json`. Pages
    /// without an id fall back to `page-<index>.json`.
    pub fn save_record(
        &self,
        extraction: &Extraction,
        source_url: &str,
        index: usize,
    ) -> Result<PathBuf, StorageError> {
        let record = &extraction.record;
        let target_dir = self.base_dir.join(record.schema());
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }

        let stem = record
            .text("imdb_id")
            .map(str::to_string)
            .unwrap_or_else(|| format!("page-{}", index));
        let file_path = target_dir.join(format!("{}.json", stem));

        let envelope = RecordEnvelope {
            source_url,
            schema: record.schema(),
            extracted_at: chrono::Utc::now().to_rfc3339(),
            record,
        };
        let json = serde_json::to_string_pretty(&envelope)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json).map_err(StorageError::IoError)?;
        tracing::debug!("Saved {} record to {}", record.schema(), file_path.display());

        Ok(file_path)
    }

    /// Writes follow-up links one per line, replacing any previous list.
    pub fn save_follow_ups(&self, links: &[String]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(FOLLOW_UPS_FILE);
        let mut contents = links.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }

        fs::write(&file_path, contents).map_err(StorageError::IoError)?;
        tracing::info!("Saved {} follow-up links to {}", links.len(), file_path.display());

        Ok(file_path)
    }
}
