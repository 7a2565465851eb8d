// src/schemas/mod.rs
//! Declared field lists, one per page type, and the rule choosing between them.

pub mod credits;
pub mod title;

use scraper::Selector;
use url::Url;

/// Which schema applies to a fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// `/title/tt#######/`: the movie itself.
    Title,
    /// `/title/tt#######/fullcredits`: cast and writer references.
    Credits,
}

impl PageKind {
    pub fn detect(url: &str) -> Self {
        let is_credits = match Url::parse(url) {
            Ok(parsed) => parsed
                .path_segments()
                .is_some_and(|mut segments| segments.any(|s| s == "fullcredits")),
            Err(_) => url.contains("/fullcredits"),
        };

        if is_credits {
            PageKind::Credits
        } else {
            PageKind::Title
        }
    }
}

/// Compiles a selector literal. Only called from `Lazy` statics with constant input.
pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("Failed to compile selector '{}': {:?}", css, e))
}
