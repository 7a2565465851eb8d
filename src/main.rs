// src/main.rs
use clap::Parser;
use movie_extractor::config::{ExtractorConfig, SubsetOrder, DEFAULT_BASE_URL};
use movie_extractor::extractors::Extractor;
use movie_extractor::runner;
use movie_extractor::storage::StorageManager;
use movie_extractor::utils::{self, AppError, ConfigError};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Extracts movie and credits records from pages a crawler already saved to disk
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON manifest of saved pages: [{"url": "...", "path": "..."}]
    #[arg(short, long)]
    manifest: PathBuf,

    /// Output directory for records and follow-up links
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Site root that relative profile links are resolved against
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Maximum number of pages extracted at once
    #[arg(short, long, default_value_t = 8)]
    concurrency: usize,

    /// Keep cast rows in page order instead of odd rows first, then even rows
    #[arg(long)]
    document_order: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments, then set up logging (RUST_LOG overrides --log-level)
    let args = Args::parse();
    utils::logging::setup_logging(&args.log_level);
    tracing::info!("Starting extraction run for args: {:?}", args);

    // 2. Build the fixed extraction configuration
    let mut config = ExtractorConfig::new(&args.base_url)?;
    if args.document_order {
        config = config.with_subset_order(SubsetOrder::Document);
    }
    let extractor = Arc::new(Extractor::new(config)?);

    // 3. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 4. Load the pages handed over by the crawler
    let pages = runner::load_manifest(&args.manifest)?;
    if pages.is_empty() {
        return Err(ConfigError::Manifest(format!("{} lists no pages", args.manifest.display())).into());
    }

    // 5. Extract every page
    let outcomes = runner::run_batch(extractor, pages, args.concurrency).await?;

    // 6. Persist records and collect follow-up links
    let mut success_count = 0;
    let mut failure_count = 0;
    let mut follow_ups = Vec::new();
    let mut seen = HashSet::new();

    for (index, outcome) in outcomes.into_iter().enumerate() {
        let extraction = match outcome.result {
            Ok(extraction) => extraction,
            Err(e) => {
                tracing::error!("Failed to extract {}: {}", outcome.source.url, e);
                failure_count += 1;
                continue;
            }
        };

        match storage.save_record(&extraction, &outcome.source.url, index) {
            Ok(path) => {
                tracing::info!("Saved record for {} to: {}", outcome.source.url, path.display());
                success_count += 1;
            }
            Err(e) => {
                tracing::error!("Failed to save record for {}: {}", outcome.source.url, e);
                failure_count += 1;
            }
        }

        follow_ups.extend(extraction.follow_ups.into_iter().filter(|link| seen.insert(link.clone())));
    }

    storage.save_follow_ups(&follow_ups)?;

    tracing::info!("Processing finished. Success: {}, Failures: {}", success_count, failure_count);

    if success_count == 0 && failure_count > 0 {
        return Err(AppError::Processing(format!("Failed to extract any of {} pages", failure_count)));
    }

    Ok(())
}
