// src/followups.rs
use crate::record::Record;
use crate::schemas::title;
use std::collections::HashSet;
use url::Url;

/// Pages the crawler may want next, in order and without duplicates.
///
/// Title records lead with the movie's full-credits page. Every person link in
/// the record follows in field order (director, cast, writers).
pub fn derive_follow_up_links(record: &Record) -> Vec<String> {
    let mut candidates = Vec::new();

    if record.schema() == title::SCHEMA_NAME {
        candidates.extend(full_credits_url(record));
    }
    for (_, value) in record.iter() {
        candidates.extend(value.people().iter().map(|person| person.link.clone()));
    }

    let mut seen = HashSet::new();
    candidates.retain(|link| seen.insert(link.clone()));
    candidates
}

/// `<origin>/title/<imdb_id>/fullcredits` for a title record.
fn full_credits_url(record: &Record) -> Option<String> {
    let id = record.text("imdb_id")?;
    let mut url = Url::parse(record.text("movie_imdb_link")?).ok()?;
    url.set_path(&format!("/title/{}/fullcredits", id));
    url.set_query(None);
    url.set_fragment(None);
    Some(url.to_string())
}
