//! Normalization of raw discover results.
//!
//! Turns the service's loosely typed JSON into [`CandidateItem`]s:
//! - `title` / `name` collapse into one `title`
//! - `releaseDate` / `firstAirDate` collapse into one date and a year
//! - `mediaType` strings become [`MediaType`]
//!
//! Nothing in here fails on a malformed field. Bad dates become
//! [`UNKNOWN_YEAR`], entries that are not a movie or show are dropped.

use crate::error::{CurateError, Result};
use crate::types::*;

/// Parse the year from the first four characters of a date string.
///
/// `"2019-05-02"` gives 2019. Missing, short, or non-numeric input gives
/// [`UNKNOWN_YEAR`].
pub fn parse_release_year(date: Option<&str>) -> i32 {
    let Some(date) = date else {
        return UNKNOWN_YEAR;
    };
    let prefix: String = date.trim().chars().take(4).collect();
    if prefix.len() < 4 {
        return UNKNOWN_YEAR;
    }
    prefix.parse::<i32>().unwrap_or(UNKNOWN_YEAR)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl RawDiscoverItem {
    /// Normalize into a [`CandidateItem`].
    ///
    /// `implied` is the category of the feed the item came from; it is used
    /// only when the result carries no `mediaType`. Returns `None` for
    /// people, collections, or anything without a title.
    pub fn into_candidate(self, implied: Option<MediaType>) -> Option<CandidateItem> {
        let media_type = match non_empty(&self.media_type) {
            Some(raw) => raw.parse::<MediaType>().ok()?,
            None => implied?,
        };

        let title = match media_type {
            MediaType::Movie => non_empty(&self.title).or(non_empty(&self.name)),
            MediaType::Show => non_empty(&self.name).or(non_empty(&self.title)),
        }?
        .to_string();

        let release_date = non_empty(&self.release_date)
            .or(non_empty(&self.first_air_date))
            .map(str::to_string);
        let release_year = parse_release_year(release_date.as_deref());

        Some(CandidateItem {
            media_type,
            id: self.id,
            title,
            release_date,
            release_year,
            original_language: self.original_language.unwrap_or_default(),
            genre_ids: self.genre_ids,
            overview: self.overview.unwrap_or_default(),
            rating: None,
        })
    }
}

impl DiscoverPage {
    /// Normalize every usable result on the page, preserving page order.
    pub fn into_candidates(self, feed: Feed) -> Vec<CandidateItem> {
        let implied = feed.implied_media_type();
        self.results
            .into_iter()
            .filter_map(|raw| raw.into_candidate(implied))
            .collect()
    }
}

/// Decode a discover response body into candidates.
pub fn parse_discover_page(body: &str, feed: Feed, page: u32) -> Result<Vec<CandidateItem>> {
    let parsed: DiscoverPage = serde_json::from_str(body).map_err(|e| CurateError::Fetch {
        feed: feed.to_string(),
        page,
        reason: format!("invalid discover payload: {}", e),
    })?;
    Ok(parsed.into_candidates(feed))
}
