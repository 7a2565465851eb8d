// src/config.rs
use crate::extractors::numeric::NumericLocale;
use crate::utils::error::ConfigError;
use url::Url;

/// Site root that relative profile links are resolved against.
pub const DEFAULT_BASE_URL: &str = "http://www.imdb.com";

/// Order of cast rows split across alternating `odd` / `even` row classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubsetOrder {
    /// Every `odd` row, then every `even` row.
    #[default]
    Concatenated,
    /// Rows as they appear in the page.
    Document,
}

/// Settings fixed once at startup and shared read-only by every extraction.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub base_url: Url,
    pub locale: NumericLocale,
    pub subset_order: SubsetOrder,
}

impl ExtractorConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidBaseUrl(base_url.to_string(), e))?;
        Ok(Self {
            base_url,
            locale: NumericLocale::default(),
            subset_order: SubsetOrder::default(),
        })
    }

    pub fn with_locale(mut self, locale: NumericLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_subset_order(mut self, order: SubsetOrder) -> Self {
        self.subset_order = order;
        self
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL")
    }
}
