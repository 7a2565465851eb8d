// src/extractors/correlate.rs
use crate::extractors::identifier::{self, IdKind};
use crate::record::PersonRef;
use crate::utils::error::ExtractError;
use url::Url;

/// Zips independently queried name / link / credit lists into [`PersonRef`]s.
#[derive(Debug, Clone)]
pub struct Correlator {
    base_url: Url,
}

impl Correlator {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute form of a (usually site-relative) href.
    pub fn resolve(&self, href: &str) -> String {
        match self.base_url.join(href.trim()) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::debug!("Could not join '{}' onto {}: {}", href, self.base_url, e);
                format!("{}{}", self.base_url.as_str().trim_end_matches('/'), href.trim())
            }
        }
    }

    pub fn person(&self, name: &str, href: &str, credit: Option<&str>) -> PersonRef {
        let link = self.resolve(href);
        let name_id = identifier::extract(Some(&link), IdKind::Name);
        PersonRef {
            name: name.to_string(),
            link,
            name_id,
            credit: credit.map(str::to_string),
        }
    }

    /// One [`PersonRef`] per position present in every input list. Surplus
    /// trailing entries of longer lists are dropped.
    pub fn correlate(
        &self,
        names: &[String],
        hrefs: &[String],
        credits: Option<&[String]>,
    ) -> Vec<PersonRef> {
        let mut lengths = vec![names.len(), hrefs.len()];
        lengths.extend(credits.map(<[String]>::len));

        let kept = match check_lengths(&lengths) {
            Ok(len) => len,
            Err(e) => {
                tracing::warn!("Truncating correlated rows: {}", e);
                lengths.iter().copied().min().unwrap_or(0)
            }
        };

        (0..kept)
            .map(|i| {
                let credit = credits.map(|c| c[i].as_str());
                self.person(&names[i], &hrefs[i], credit)
            })
            .collect()
    }

    /// Concatenates subsets correlated on their own, first subset entirely,
    /// then the next.
    pub fn concat_subsets(&self, subsets: Vec<Vec<PersonRef>>) -> Vec<PersonRef> {
        subsets.into_iter().flatten().collect()
    }
}

/// Common length of parallel lists, or `LengthMismatch` carrying the length
/// truncation would keep.
pub fn check_lengths(lengths: &[usize]) -> Result<usize, ExtractError> {
    let min = lengths.iter().copied().min().unwrap_or(0);
    if lengths.iter().all(|len| *len == min) {
        Ok(min)
    } else {
        Err(ExtractError::LengthMismatch {
            lengths: lengths.to_vec(),
            kept: min,
        })
    }
}
