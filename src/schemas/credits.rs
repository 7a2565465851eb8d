// src/schemas/credits.rs
//! Cross-reference schema: cast and writer references from a full-credits page.

use crate::config::SubsetOrder;
use crate::document::{Document, Landmark};
use crate::extractors::identifier::{self, IdKind};
use crate::extractors::pipeline::{non_empty, ExtractContext, FieldSpec, Schema};
use crate::record::{PersonRef, Value};
use crate::schemas::selector;
use crate::utils::error::{ConfigError, ExtractError};
use once_cell::sync::Lazy;
use scraper::Selector;

pub const SCHEMA_NAME: &str = "credits";

// --- CSS Selectors (Lazy Static) ---
// Cast rows alternate between two styling classes; each class is queried on its own.
static CAST_ODD_NAMES: Lazy<Selector> =
    Lazy::new(|| selector("table.cast_list tr.odd td.itemprop > a > span.itemprop"));
static CAST_ODD_LINKS: Lazy<Selector> = Lazy::new(|| selector("table.cast_list tr.odd td.itemprop > a"));
static CAST_EVEN_NAMES: Lazy<Selector> =
    Lazy::new(|| selector("table.cast_list tr.even td.itemprop > a > span.itemprop"));
static CAST_EVEN_LINKS: Lazy<Selector> = Lazy::new(|| selector("table.cast_list tr.even td.itemprop > a"));
static CAST_NAMES: Lazy<Selector> = Lazy::new(|| {
    selector(
        "table.cast_list tr.odd td.itemprop > a > span.itemprop, \
         table.cast_list tr.even td.itemprop > a > span.itemprop",
    )
});
static CAST_LINKS: Lazy<Selector> = Lazy::new(|| {
    selector("table.cast_list tr.odd td.itemprop > a, table.cast_list tr.even td.itemprop > a")
});

static WRITER_NAME: Lazy<Selector> = Lazy::new(|| selector("td.name > a"));
static WRITER_CREDIT: Lazy<Selector> = Lazy::new(|| selector("td.credit"));

// --- Section landmarks ---
static WRITING_CREDITS: Lazy<Landmark> =
    Lazy::new(|| Landmark::new(selector("h4")).containing("Writing Credits"));
static CAST_HEADING: Lazy<Landmark> = Lazy::new(|| Landmark::new(selector("h4#cast")));

pub fn schema() -> Result<Schema, ConfigError> {
    Schema::new(
        SCHEMA_NAME,
        vec![
            FieldSpec::new("movie_imdb_people_link", |doc: &Document, _: &ExtractContext| {
                Ok::<_, ExtractError>(Value::Text(doc.url().to_string()))
            }),
            FieldSpec::new("imdb_id", |doc: &Document, _: &ExtractContext| {
                identifier::parse(doc.url(), IdKind::Title).map(Value::from)
            }),
            FieldSpec::new("cast_info", cast_info),
            FieldSpec::new("writer_info", writer_info),
        ],
    )
}

fn cast_info(doc: &Document, ctx: &ExtractContext) -> Result<Value, ExtractError> {
    let cast = match ctx.subset_order {
        SubsetOrder::Concatenated => {
            let odd = correlate_rows(doc, ctx, &CAST_ODD_NAMES, &CAST_ODD_LINKS);
            let even = correlate_rows(doc, ctx, &CAST_EVEN_NAMES, &CAST_EVEN_LINKS);
            ctx.correlator.concat_subsets(vec![odd, even])
        }
        SubsetOrder::Document => correlate_rows(doc, ctx, &CAST_NAMES, &CAST_LINKS),
    };
    non_empty(cast, &CAST_LINKS).map(Value::from)
}

fn correlate_rows(
    doc: &Document,
    ctx: &ExtractContext,
    names: &Selector,
    links: &Selector,
) -> Vec<PersonRef> {
    let names = doc.query_text(names);
    let hrefs = doc.query_attr(links, "href");
    ctx.correlator.correlate(&names, &hrefs, None)
}

fn writer_info(doc: &Document, ctx: &ExtractContext) -> Result<Value, ExtractError> {
    let rows = doc.select_between(&WRITING_CREDITS, Some(&CAST_HEADING));
    if rows.is_empty() {
        return Err(ExtractError::NotFound("writing credits section".to_string()));
    }

    let mut names = Vec::new();
    let mut hrefs = Vec::new();
    let mut credits = Vec::new();
    for row in &rows {
        names.extend(row.query_text(&WRITER_NAME));
        hrefs.extend(row.query_attr(&WRITER_NAME, "href"));
        credits.extend(row.query_text(&WRITER_CREDIT));
    }

    let writers = ctx.correlator.correlate(&names, &hrefs, Some(&credits));
    non_empty(writers, &WRITER_NAME).map(Value::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorConfig;
    use crate::extractors::pipeline::assemble;
    use crate::record::Record;

    const URL: &str = "http://www.imdb.com/title/tt0068646/fullcredits";

    const CREDITS_PAGE: &str = r#"
        <html><body><div id="fullcredits_content" class="header">
          <h4 class="dataHeaderWithBorder">Directed by</h4>
          <table class="simpleTable simpleCreditsTable"><tbody>
            <tr><td class="name"><a href="/name/nm0000338/?ref_=ttfc_fc_dr1"> Francis Ford Coppola
</a></td><td>...</td><td class="credit"></td></tr>
          </tbody></table>
          <h4 class="dataHeaderWithBorder">Writing Credits <span>(WGA)</span></h4>
          <table class="simpleTable simpleCreditsTable"><tbody>
            <tr><td class="name"><a href="/name/nm0701374/?ref_=ttfc_fc_wr1"> Mario Puzo
</a></td><td>...</td><td class="credit">(screenplay) and</td></tr>
            <tr><td class="name"><a href="/name/nm0000338/?ref_=ttfc_fc_wr2"> Francis Ford Coppola
</a></td><td>...</td><td class="credit">(screenplay)</td></tr>
            <tr><td class="name"><a href="/name/nm0701374/?ref_=ttfc_fc_wr3"> Mario Puzo
</a></td><td>...</td><td class="credit">(based on the novel by)</td></tr>
          </tbody></table>
          <h4 name="cast" id="cast" class="dataHeaderWithBorder">Cast</h4>
          <table class="cast_list">
            <tr><td colspan="4" class="castlist_label">Cast overview, first billed only:</td></tr>
            <tr class="odd"><td class="primary_photo"></td><td class="itemprop"><a href="/name/nm0000008/?ref_=ttfc_fc_cl_t1"><span class="itemprop">Marlon Brando</span></a></td></tr>
            <tr class="even"><td class="primary_photo"></td><td class="itemprop"><a href="/name/nm0000199/?ref_=ttfc_fc_cl_t2"><span class="itemprop">Al Pacino</span></a></td></tr>
            <tr class="odd"><td class="primary_photo"></td><td class="itemprop"><a href="/name/nm0001001/?ref_=ttfc_fc_cl_t3"><span class="itemprop">James Caan</span></a></td></tr>
          </table>
          <h4 class="dataHeaderWithBorder">Produced by</h4>
          <table class="simpleTable simpleCreditsTable"><tbody>
            <tr><td class="name"><a href="/name/nm0734752/"> Gray Frederickson
</a></td><td>...</td><td class="credit">associate producer</td></tr>
          </tbody></table>
        </div></body></html>
    "#;

    fn extract(html: &str, config: ExtractorConfig) -> Record {
        let ctx = ExtractContext::from_config(&config);
        assemble(&Document::parse(html, URL), &schema().unwrap(), &ctx)
    }

    fn names(record: &Record, field: &str) -> Vec<String> {
        record.get(field).unwrap().people().iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn cast_subsets_are_concatenated_by_default() {
        let record = extract(CREDITS_PAGE, ExtractorConfig::default());
        assert_eq!(names(&record, "cast_info"), vec!["Marlon Brando", "James Caan", "Al Pacino"]);

        let brando = &record.get("cast_info").unwrap().people()[0];
        assert_eq!(brando.link, "http://www.imdb.com/name/nm0000008/?ref_=ttfc_fc_cl_t1");
        assert_eq!(brando.name_id.as_deref(), Some("nm0000008"));
        assert_eq!(brando.credit, None);
    }

    #[test]
    fn cast_can_follow_document_order() {
        let config = ExtractorConfig::default().with_subset_order(SubsetOrder::Document);
        let record = extract(CREDITS_PAGE, config);
        assert_eq!(names(&record, "cast_info"), vec!["Marlon Brando", "Al Pacino", "James Caan"]);
    }

    #[test]
    fn writers_are_scoped_to_their_section() {
        let record = extract(CREDITS_PAGE, ExtractorConfig::default());
        let writers = record.get("writer_info").unwrap().people();

        assert_eq!(writers.len(), 3);
        assert_eq!(writers[0].name, "Mario Puzo");
        assert_eq!(writers[0].credit.as_deref(), Some("(screenplay) and"));
        assert_eq!(writers[1].name_id.as_deref(), Some("nm0000338"));
        assert_eq!(writers[2].credit.as_deref(), Some("(based on the novel by)"));
        assert!(writers.iter().all(|w| w.name != "Gray Frederickson"));
    }

    #[test]
    fn record_carries_source_link_and_movie_id() {
        let record = extract(CREDITS_PAGE, ExtractorConfig::default());
        let fields: Vec<_> = record.field_names().collect();
        assert_eq!(fields, vec!["movie_imdb_people_link", "imdb_id", "cast_info", "writer_info"]);
        assert_eq!(record.text("movie_imdb_people_link"), Some(URL));
        assert_eq!(record.text("imdb_id"), Some("tt0068646"));
    }

    #[test]
    fn missing_writer_section_nulls_only_writers() {
        let page = CREDITS_PAGE.replace("Writing Credits", "Story by");
        let record = extract(&page, ExtractorConfig::default());
        assert_eq!(record.get("writer_info"), Some(&Value::Null));
        assert_eq!(names(&record, "cast_info").len(), 3);
    }

    #[test]
    fn page_without_credits_is_fully_keyed() {
        let record = extract("<html><body></body></html>", ExtractorConfig::default());
        assert_eq!(record.len(), 4);
        assert_eq!(record.get("cast_info"), Some(&Value::Null));
        assert_eq!(record.get("writer_info"), Some(&Value::Null));
    }
}
