// src/extractors/numeric.rs
use crate::utils::error::ExtractError;

/// Digit grouping convention used when reading counts off a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericLocale {
    pub grouping: char,
}

impl NumericLocale {
    pub const EN_US: NumericLocale = NumericLocale { grouping: ',' };
}

impl Default for NumericLocale {
    fn default() -> Self {
        Self::EN_US
    }
}

/// Parses grouped integers such as `"2,238 user"`. The locale is fixed at
/// construction and never read from the process environment.
#[derive(Debug, Clone, Copy)]
pub struct NumberNormalizer {
    locale: NumericLocale,
}

impl NumberNormalizer {
    pub fn new(locale: NumericLocale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> NumericLocale {
        self.locale
    }

    /// Integer formed from the leading whitespace-delimited token, grouping
    /// characters removed. Trailing words are ignored.
    pub fn parse(&self, raw: &str) -> Result<i64, ExtractError> {
        let token = raw
            .split_whitespace()
            .next()
            .ok_or_else(|| ExtractError::MalformedValue("empty numeric text".to_string()))?;

        let digits: String = token.chars().filter(|c| *c != self.locale.grouping).collect();
        digits
            .parse::<i64>()
            .map_err(|e| ExtractError::MalformedValue(format!("'{}' is not an integer: {}", token, e)))
    }

    /// Total variant of [`parse`](Self::parse).
    pub fn normalize(&self, raw: Option<&str>) -> Option<i64> {
        self.parse(raw?).ok()
    }
}

impl Default for NumberNormalizer {
    fn default() -> Self {
        Self::new(NumericLocale::default())
    }
}
