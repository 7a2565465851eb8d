// src/extractors/identifier.rs
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// e.g. http://www.imdb.com/title/tt0068646/?ref_=nv_sr_1
static TITLE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"tt[0-9]{7}").expect("Failed to compile TITLE_ID_RE"));

// e.g. http://www.imdb.com/name/nm0000338/?ref_=tt_ov_dr
static NAME_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"nm[0-9]{7}").expect("Failed to compile NAME_ID_RE"));

/// The two identifier shapes found in page URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// A movie, `tt` + 7 digits.
    Title,
    /// A person, `nm` + 7 digits.
    Name,
}

impl IdKind {
    pub fn prefix(self) -> &'static str {
        match self {
            IdKind::Title => "tt",
            IdKind::Name => "nm",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            IdKind::Title => &TITLE_ID_RE,
            IdKind::Name => &NAME_ID_RE,
        }
    }
}

/// First `<prefix><7 digits>` substring of `url`.
pub fn parse(url: &str, kind: IdKind) -> Result<String, ExtractError> {
    kind.pattern()
        .find(url)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ExtractError::InvalidIdentifierShape {
            prefix: kind.prefix(),
            input: url.to_string(),
        })
}

/// Total variant of [`parse`]: absent input or no match gives `None`.
pub fn extract(url: Option<&str>, kind: IdKind) -> Option<String> {
    let url = url?;
    match parse(url, kind) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::trace!("{}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_title_id_inside_url() {
        let url = "http://www.imdb.com/title/tt1234567/?ref_=nv_sr_1";
        assert_eq!(extract(Some(url), IdKind::Title).as_deref(), Some("tt1234567"));
    }

    #[test]
    fn finds_name_id_inside_url() {
        let url = "http://www.imdb.com/name/nm0000338/?ref_=tt_ov_dr";
        assert_eq!(extract(Some(url), IdKind::Name).as_deref(), Some("nm0000338"));
    }

    #[test]
    fn missing_or_short_ids_give_none() {
        assert_eq!(extract(Some("http://www.imdb.com/chart/top"), IdKind::Title), None);
        assert_eq!(extract(Some("http://www.imdb.com/title/tt123456/"), IdKind::Title), None);
        assert_eq!(extract(None, IdKind::Name), None);
    }

    #[test]
    fn kinds_do_not_cross_match() {
        let url = "http://www.imdb.com/title/tt0068646/";
        assert_eq!(extract(Some(url), IdKind::Name), None);
        assert!(matches!(
            parse(url, IdKind::Name),
            Err(ExtractError::InvalidIdentifierShape { prefix: "nm", .. })
        ));
    }

    #[test]
    fn first_match_wins() {
        let url = "http://www.imdb.com/title/tt0068646/?related=tt0071562";
        assert_eq!(parse(url, IdKind::Title).unwrap(), "tt0068646");
    }
}
