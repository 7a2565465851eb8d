// src/extractors/mod.rs
pub mod correlate;
pub mod identifier;
pub mod numeric;
pub mod pipeline;

use crate::config::ExtractorConfig;
use crate::document::Document;
use crate::followups::derive_follow_up_links;
use crate::record::Record;
use crate::schemas::{self, PageKind};
use crate::utils::error::ConfigError;
use pipeline::{assemble, ExtractContext, Schema};

// Re-export key extraction types for convenience
pub use correlate::Correlator;
pub use identifier::IdKind;
pub use numeric::{NumberNormalizer, NumericLocale};
pub use pipeline::{FieldExtractor, FieldSpec};

/// Output for one page: its record plus advisory links for the crawler.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub kind: PageKind,
    pub record: Record,
    pub follow_ups: Vec<String>,
}

/// Holds the fixed configuration and both schemas. Built once, then shared
/// read-only (it is `Send + Sync`) by every worker.
#[derive(Debug)]
pub struct Extractor {
    ctx: ExtractContext,
    title: Schema,
    credits: Schema,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Result<Self, ConfigError> {
        tracing::debug!("Building extractor with {:?}", config);
        Ok(Self {
            ctx: ExtractContext::from_config(&config),
            title: schemas::title::schema()?,
            credits: schemas::credits::schema()?,
        })
    }

    pub fn context(&self) -> &ExtractContext {
        &self.ctx
    }

    pub fn schema(&self, kind: PageKind) -> &Schema {
        match kind {
            PageKind::Title => &self.title,
            PageKind::Credits => &self.credits,
        }
    }

    pub fn extract(&self, doc: &Document) -> Extraction {
        let kind = PageKind::detect(doc.url());
        let record = assemble(doc, self.schema(kind), &self.ctx);
        let follow_ups = derive_follow_up_links(&record);
        tracing::info!(
            "Extracted {:?} page {} ({} null fields, {} follow-up links)",
            kind,
            doc.url(),
            record.null_count(),
            follow_ups.len()
        );
        Extraction { kind, record, follow_ups }
    }

    /// Parses `html` and extracts it in one step.
    pub fn extract_html(&self, html: &str, url: &str) -> Extraction {
        self.extract(&Document::parse(html, url))
    }
}
