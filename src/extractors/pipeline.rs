// src/extractors/pipeline.rs
//! Record assembly: runs every field of a schema against one document and
//! collects the results, turning each failed field into `null`.

use crate::config::{ExtractorConfig, SubsetOrder};
use crate::document::{Document, Landmark};
use crate::extractors::correlate::Correlator;
use crate::extractors::numeric::NumberNormalizer;
use crate::record::{Record, Value};
use crate::utils::error::{ConfigError, ExtractError};
use scraper::Selector;
use std::collections::HashSet;

/// Read-only collaborators shared by every field extractor.
#[derive(Debug, Clone)]
pub struct ExtractContext {
    pub normalizer: NumberNormalizer,
    pub correlator: Correlator,
    pub subset_order: SubsetOrder,
}

impl ExtractContext {
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self {
            normalizer: NumberNormalizer::new(config.locale),
            correlator: Correlator::new(config.base_url.clone()),
            subset_order: config.subset_order,
        }
    }
}

/// Computes one field from a document. Implemented for plain functions and
/// closures of the matching shape.
pub trait FieldExtractor: Send + Sync {
    fn extract(&self, doc: &Document, ctx: &ExtractContext) -> Result<Value, ExtractError>;
}

impl<F> FieldExtractor for F
where
    F: Fn(&Document, &ExtractContext) -> Result<Value, ExtractError> + Send + Sync,
{
    fn extract(&self, doc: &Document, ctx: &ExtractContext) -> Result<Value, ExtractError> {
        self(doc, ctx)
    }
}

pub struct FieldSpec {
    name: &'static str,
    extractor: Box<dyn FieldExtractor>,
}

impl FieldSpec {
    pub fn new(name: &'static str, extractor: impl FieldExtractor + 'static) -> Self {
        Self {
            name,
            extractor: Box::new(extractor),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Named, ordered list of field specs with unique names.
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(name: &'static str, fields: Vec<FieldSpec>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for spec in &fields {
            if !seen.insert(spec.name) {
                return Err(ConfigError::DuplicateField { schema: name, field: spec.name });
            }
        }
        Ok(Self { name, fields })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(FieldSpec::name)
    }
}

/// Runs every spec of `schema` in declaration order. Never fails: a field whose
/// extractor errors is recorded as [`Value::Null`].
pub fn assemble(doc: &Document, schema: &Schema, ctx: &ExtractContext) -> Record {
    let mut fields = Vec::with_capacity(schema.fields.len());

    for spec in &schema.fields {
        let value = match spec.extractor.extract(doc, ctx) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Field '{}' of {} is null: {}", spec.name, doc.url(), e);
                Value::Null
            }
        };
        fields.push((spec.name, value));
    }

    let record = Record::new(schema.name, fields);
    tracing::debug!(
        "Assembled '{}' record for {} ({} of {} fields null)",
        schema.name,
        doc.url(),
        record.null_count(),
        record.len()
    );
    record
}

// --- Field helpers shared by the schemas ---

pub fn text_list(doc: &Document, selector: &Selector) -> Result<Vec<String>, ExtractError> {
    non_empty(doc.query_text(selector), selector)
}

pub fn first_text(doc: &Document, selector: &Selector) -> Result<String, ExtractError> {
    first(doc.query_text(selector), selector)
}

pub fn first_attr(doc: &Document, selector: &Selector, attr: &str) -> Result<String, ExtractError> {
    first(doc.query_attr(selector, attr), selector)
}

pub fn first_integer(
    doc: &Document,
    selector: &Selector,
    ctx: &ExtractContext,
) -> Result<i64, ExtractError> {
    ctx.normalizer.parse(&first_text(doc, selector)?)
}

/// Text following a heading-like landmark, e.g. the amount after `Budget:`.
pub fn text_after(doc: &Document, landmark: &Landmark) -> Result<Vec<String>, ExtractError> {
    let heading = doc
        .find_landmark(landmark)
        .ok_or_else(|| ExtractError::NotFound(format!("{:?}", landmark)))?;
    let text = heading.following_text();
    if text.is_empty() {
        return Err(ExtractError::NotFound(format!("text after {:?}", landmark)));
    }
    Ok(text)
}

pub fn non_empty<T>(items: Vec<T>, selector: &Selector) -> Result<Vec<T>, ExtractError> {
    if items.is_empty() {
        Err(not_found(selector))
    } else {
        Ok(items)
    }
}

fn first(items: Vec<String>, selector: &Selector) -> Result<String, ExtractError> {
    items.into_iter().next().ok_or_else(|| not_found(selector))
}

fn not_found(selector: &Selector) -> ExtractError {
    ExtractError::NotFound(format!("{:?}", selector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
    static COUNT: Lazy<Selector> = Lazy::new(|| Selector::parse("span.count").unwrap());

    fn ctx() -> ExtractContext {
        ExtractContext::from_config(&ExtractorConfig::default())
    }

    fn heading(doc: &Document, _: &ExtractContext) -> Result<Value, ExtractError> {
        first_text(doc, &H1).map(Value::from)
    }

    fn count(doc: &Document, ctx: &ExtractContext) -> Result<Value, ExtractError> {
        first_integer(doc, &COUNT, ctx).map(Value::from)
    }

    fn schema() -> Schema {
        Schema::new(
            "test",
            vec![
                FieldSpec::new("heading", heading),
                FieldSpec::new("count", count),
                FieldSpec::new("always_fails", |_: &Document, _: &ExtractContext| -> Result<Value, ExtractError> {
                    Err(ExtractError::MalformedValue("boom".into()))
                }),
                FieldSpec::new("url", |doc: &Document, _: &ExtractContext| -> Result<Value, ExtractError> {
                    Ok(Value::Text(doc.url().to_string()))
                }),
            ],
        )
        .unwrap()
    }

    #[test]
    fn every_declared_field_is_present_in_order() {
        let doc = Document::parse("<h1>Title</h1><span class='count'>1,024 votes</span>", "http://t/");
        let record = assemble(&doc, &schema(), &ctx());

        let names: Vec<_> = record.field_names().collect();
        assert_eq!(names, vec!["heading", "count", "always_fails", "url"]);
        assert_eq!(record.text("heading"), Some("Title"));
        assert_eq!(record.get("count"), Some(&Value::Integer(1024)));
        assert_eq!(record.get("always_fails"), Some(&Value::Null));
        assert_eq!(record.text("url"), Some("http://t/"));
    }

    #[test]
    fn empty_page_still_yields_full_shape() {
        let doc = Document::parse("", "http://t/");
        let record = assemble(&doc, &schema(), &ctx());
        assert_eq!(record.len(), 4);
        assert_eq!(record.null_count(), 3);
    }

    #[test]
    fn malformed_number_only_nulls_its_own_field() {
        let doc = Document::parse("<h1>Title</h1><span class='count'>many</span>", "http://t/");
        let record = assemble(&doc, &schema(), &ctx());
        assert_eq!(record.get("count"), Some(&Value::Null));
        assert_eq!(record.text("heading"), Some("Title"));
    }

    #[test]
    fn assembling_twice_is_deterministic() {
        let doc = Document::parse("<h1>Title</h1>", "http://t/");
        let schema = schema();
        assert_eq!(assemble(&doc, &schema, &ctx()), assemble(&doc, &schema, &ctx()));
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let result = Schema::new(
            "dup",
            vec![FieldSpec::new("heading", heading), FieldSpec::new("heading", count)],
        );
        assert!(matches!(
            result,
            Err(ConfigError::DuplicateField { schema: "dup", field: "heading" })
        ));
    }
}
