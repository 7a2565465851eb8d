// src/runner.rs
//! Offline batch driver: feeds saved pages through a shared [`Extractor`] with
//! bounded parallelism.

use crate::extractors::{Extraction, Extractor};
use crate::utils::error::{AppError, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// One already-fetched page: where it came from and where it was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSource {
    pub url: String,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct PageOutcome {
    pub source: PageSource,
    pub result: Result<Extraction, AppError>,
}

/// Reads a JSON array of [`PageSource`]s. Relative page paths are taken
/// relative to the manifest's directory.
pub fn load_manifest(path: &Path) -> Result<Vec<PageSource>, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Manifest(format!("{}: {}", path.display(), e)))?;
    let mut pages: Vec<PageSource> = serde_json::from_str(&raw)
        .map_err(|e| ConfigError::Manifest(format!("{}: {}", path.display(), e)))?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for page in &mut pages {
        if page.path.is_relative() {
            page.path = base.join(&page.path);
        }
    }

    tracing::info!("Loaded {} pages from manifest {}", pages.len(), path.display());
    Ok(pages)
}

/// Extracts every page, at most `concurrency` at a time. Outcomes come back in
/// input order; one page failing never stops the others.
pub async fn run_batch(
    extractor: Arc<Extractor>,
    pages: Vec<PageSource>,
    concurrency: usize,
) -> Result<Vec<PageOutcome>, ConfigError> {
    if concurrency == 0 {
        return Err(ConfigError::ZeroConcurrency);
    }
    tracing::info!("Extracting {} pages (concurrency {})", pages.len(), concurrency);

    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut handles = Vec::with_capacity(pages.len());

    for page in pages {
        let extractor = Arc::clone(&extractor);
        let semaphore = Arc::clone(&semaphore);
        let source = page.clone();

        let handle = tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => return Err(AppError::Processing(format!("worker pool closed: {}", e))),
            };
            // The parsed tree is not Send, so parsing happens on the blocking thread.
            match tokio::task::spawn_blocking(move || extract_page(&extractor, &source)).await {
                Ok(result) => result,
                Err(e) => Err(AppError::Processing(format!("extraction task failed: {}", e))),
            }
        });
        handles.push((page, handle));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (source, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(AppError::Processing(format!("worker for {} failed: {}", source.url, e))),
        };
        if let Err(e) = &result {
            tracing::warn!("Page {} failed: {}", source.url, e);
        }
        outcomes.push(PageOutcome { source, result });
    }

    Ok(outcomes)
}

fn extract_page(extractor: &Extractor, source: &PageSource) -> Result<Extraction, AppError> {
    let html = std::fs::read_to_string(&source.path)?;
    tracing::debug!("Read {} bytes for {} from {}", html.len(), source.url, source.path.display());
    Ok(extractor.extract_html(&html, &source.url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorConfig;
    use crate::schemas::PageKind;
    use std::fs;

    fn write_page(dir: &Path, name: &str, html: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, html).unwrap();
        path
    }

    #[test]
    fn manifest_paths_resolve_against_manifest_dir() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("pages.json");
        fs::write(
            &manifest,
            r#"[{"url": "http://www.imdb.com/title/tt0068646/", "path": "godfather.html"},
                {"url": "http://www.imdb.com/title/tt0071562/", "path": "/abs/part2.html"}]"#,
        )
        .unwrap();

        let pages = load_manifest(&manifest).unwrap();
        assert_eq!(pages[0].path, dir.path().join("godfather.html"));
        assert_eq!(pages[1].path, PathBuf::from("/abs/part2.html"));
    }

    #[test]
    fn malformed_manifest_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("pages.json");
        fs::write(&manifest, "{not json").unwrap();
        assert!(matches!(load_manifest(&manifest), Err(ConfigError::Manifest(_))));
    }

    #[test]
    fn batch_keeps_input_order_and_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let title = write_page(dir.path(), "title.html", r#"<div class="title_wrapper"><h1>Heat</h1></div>"#);
        let credits = write_page(
            dir.path(),
            "credits.html",
            r#"<table class="cast_list"><tr class="odd"><td class="itemprop"><a href="/name/nm0000134/"><span class="itemprop">Robert De Niro</span></a></td></tr></table>"#,
        );
        let pages = vec![
            PageSource { url: "http://www.imdb.com/title/tt0113277/".into(), path: title },
            PageSource { url: "http://www.imdb.com/title/tt0113277/fullcredits".into(), path: dir.path().join("missing.html") },
            PageSource { url: "http://www.imdb.com/title/tt0113277/fullcredits".into(), path: credits },
        ];
        let extractor = Arc::new(Extractor::new(ExtractorConfig::default()).unwrap());

        let outcomes = tokio_test::block_on(run_batch(extractor, pages, 2)).unwrap();

        assert_eq!(outcomes.len(), 3);
        let first = outcomes[0].result.as_ref().unwrap();
        assert_eq!(first.kind, PageKind::Title);
        assert_eq!(first.record.text("movie_title"), Some("Heat"));
        assert!(matches!(outcomes[1].result, Err(AppError::Io(_))));
        let third = outcomes[2].result.as_ref().unwrap();
        assert_eq!(third.follow_ups, vec!["http://www.imdb.com/name/nm0000134/"]);
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let extractor = Arc::new(Extractor::new(ExtractorConfig::default()).unwrap());
        let result = tokio_test::block_on(run_batch(extractor, Vec::new(), 0));
        assert!(matches!(result, Err(ConfigError::ZeroConcurrency)));
    }
}
