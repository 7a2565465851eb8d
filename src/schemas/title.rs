// src/schemas/title.rs
//! Primary-entity schema: one record per movie title page.

use crate::document::{Document, Landmark};
use crate::extractors::identifier::{self, IdKind};
use crate::extractors::pipeline::{
    first_attr, first_integer, first_text, text_after, text_list, ExtractContext, FieldSpec, Schema,
};
use crate::record::Value;
use crate::schemas::selector;
use crate::utils::error::{ConfigError, ExtractError};
use once_cell::sync::Lazy;
use scraper::Selector;

pub const SCHEMA_NAME: &str = "title";

// --- CSS Selectors (Lazy Static) ---
static MOVIE_TITLE: Lazy<Selector> = Lazy::new(|| selector(".title_wrapper > h1"));
static TITLE_YEAR: Lazy<Selector> = Lazy::new(|| selector("#titleYear > a"));
static GENRES: Lazy<Selector> = Lazy::new(|| selector("div[itemprop='genre'] a"));
static COUNTRY: Lazy<Selector> = Lazy::new(|| selector("#titleDetails > div > a[href*='country']"));
static LANGUAGE: Lazy<Selector> = Lazy::new(|| selector("#titleDetails > div > a[href*='language']"));
static PLOT_KEYWORDS: Lazy<Selector> = Lazy::new(|| selector("a > span[itemprop='keywords']"));
static STORYLINE: Lazy<Selector> =
    Lazy::new(|| selector("#titleStoryLine > div[itemprop='description'] > p"));
static COLOR: Lazy<Selector> = Lazy::new(|| selector("a[href*='colors=']"));
static RATING_VALUE: Lazy<Selector> = Lazy::new(|| selector("span[itemprop='ratingValue']"));
static METASCORE: Lazy<Selector> = Lazy::new(|| selector("div[class*='metacriticScore'] > span"));
static RATING_COUNT: Lazy<Selector> = Lazy::new(|| selector("span[itemprop='ratingCount']"));
static DURATION: Lazy<Selector> = Lazy::new(|| selector("time[itemprop='duration']"));
// "externalreviews" also contains "reviews"; the user review link comes first on the page.
static USER_REVIEWS: Lazy<Selector> = Lazy::new(|| selector("span > a[href*='reviews']"));
static CRITIC_REVIEWS: Lazy<Selector> = Lazy::new(|| selector("span > a[href*='externalreviews']"));
static DIRECTOR_NAME: Lazy<Selector> = Lazy::new(|| selector("span[itemprop='director'] > a > span"));
static DIRECTOR_LINK: Lazy<Selector> = Lazy::new(|| selector("span[itemprop='director'] > a"));

// --- Heading landmarks ---
static BUDGET: Lazy<Landmark> = Lazy::new(|| Landmark::new(selector("h4")).containing("Budget:"));
static GROSS: Lazy<Landmark> = Lazy::new(|| Landmark::new(selector("h4")).containing("Gross:"));
static ASPECT_RATIO: Lazy<Landmark> =
    Lazy::new(|| Landmark::new(selector("h4")).containing("Aspect Ratio:"));
static CONTENT_RATING: Lazy<Landmark> =
    Lazy::new(|| Landmark::new(selector("meta[itemprop='contentRating']")));

pub fn schema() -> Result<Schema, ConfigError> {
    Schema::new(
        SCHEMA_NAME,
        vec![
            FieldSpec::new("movie_imdb_link", movie_imdb_link),
            FieldSpec::new("imdb_id", imdb_id),
            FieldSpec::new("movie_title", |doc: &Document, _: &ExtractContext| text(doc, &MOVIE_TITLE)),
            FieldSpec::new("title_year", |doc: &Document, _: &ExtractContext| text(doc, &TITLE_YEAR)),
            FieldSpec::new("genres", |doc: &Document, _: &ExtractContext| list(doc, &GENRES)),
            FieldSpec::new("country", |doc: &Document, _: &ExtractContext| list(doc, &COUNTRY)),
            FieldSpec::new("language", |doc: &Document, _: &ExtractContext| list(doc, &LANGUAGE)),
            FieldSpec::new("plot_keywords", |doc: &Document, _: &ExtractContext| list(doc, &PLOT_KEYWORDS)),
            FieldSpec::new("storyline", |doc: &Document, _: &ExtractContext| text(doc, &STORYLINE)),
            FieldSpec::new("color", |doc: &Document, _: &ExtractContext| list(doc, &COLOR)),
            FieldSpec::new("budget", |doc: &Document, _: &ExtractContext| after(doc, &BUDGET)),
            FieldSpec::new("gross", |doc: &Document, _: &ExtractContext| after(doc, &GROSS)),
            FieldSpec::new("user_review_score", |doc: &Document, _: &ExtractContext| list(doc, &RATING_VALUE)),
            FieldSpec::new("critic_review_score", |doc: &Document, _: &ExtractContext| list(doc, &METASCORE)),
            FieldSpec::new("num_voted_users", |doc: &Document, ctx: &ExtractContext| count(doc, ctx, &RATING_COUNT)),
            FieldSpec::new("duration", |doc: &Document, _: &ExtractContext| list(doc, &DURATION)),
            FieldSpec::new("aspect_ratio", aspect_ratio),
            FieldSpec::new("content_rating", |doc: &Document, _: &ExtractContext| after(doc, &CONTENT_RATING)),
            FieldSpec::new("num_user_for_reviews", |doc: &Document, ctx: &ExtractContext| count(doc, ctx, &USER_REVIEWS)),
            FieldSpec::new("num_critic_for_reviews", |doc: &Document, ctx: &ExtractContext| count(doc, ctx, &CRITIC_REVIEWS)),
            FieldSpec::new("director_info", director_info),
        ],
    )
}

fn text(doc: &Document, selector: &Selector) -> Result<Value, ExtractError> {
    first_text(doc, selector).map(Value::from)
}

fn list(doc: &Document, selector: &Selector) -> Result<Value, ExtractError> {
    text_list(doc, selector).map(Value::from)
}

fn after(doc: &Document, landmark: &Landmark) -> Result<Value, ExtractError> {
    text_after(doc, landmark).map(Value::from)
}

fn count(doc: &Document, ctx: &ExtractContext, selector: &Selector) -> Result<Value, ExtractError> {
    first_integer(doc, selector, ctx).map(Value::from)
}

fn movie_imdb_link(doc: &Document, _: &ExtractContext) -> Result<Value, ExtractError> {
    Ok(Value::Text(doc.url().to_string()))
}

fn imdb_id(doc: &Document, _: &ExtractContext) -> Result<Value, ExtractError> {
    identifier::parse(doc.url(), IdKind::Title).map(Value::from)
}

fn aspect_ratio(doc: &Document, _: &ExtractContext) -> Result<Value, ExtractError> {
    // following_text already drops blank runs, so the first entry is the ratio
    text_after(doc, &ASPECT_RATIO)?
        .into_iter()
        .next()
        .map(Value::Text)
        .ok_or_else(|| ExtractError::NotFound("aspect ratio text".to_string()))
}

fn director_info(doc: &Document, ctx: &ExtractContext) -> Result<Value, ExtractError> {
    let name = first_text(doc, &DIRECTOR_NAME)?;
    let href = first_attr(doc, &DIRECTOR_LINK, "href")?;
    Ok(Value::Ref(ctx.correlator.person(&name, &href, None)))
}
