//! Core domain types for discovered media.
//!
//! The discovery service speaks in loosely typed JSON: movies carry a
//! `title` and `releaseDate`, shows carry a `name` and `firstAirDate`, and the
//! kind is a free-form `mediaType` string. Everything downstream of ingestion
//! works with the normalized [`CandidateItem`] instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CurateError;

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier assigned by the discovery service (a TMDB id for Seerr).
pub type MediaId = u64;

/// Year used when a release date is missing or unparseable.
pub const UNKNOWN_YEAR: i32 = 0;

// =============================================================================
// Media Type
// =============================================================================

/// The two categories the curator fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    #[serde(rename = "tv")]
    Show,
}

impl MediaType {
    /// Spelling used in `mediaType` fields and request bodies.
    pub fn wire_name(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Show => "tv",
        }
    }

    /// Path segment of the per-category discover endpoint.
    pub fn discover_segment(self) -> &'static str {
        match self {
            MediaType::Movie => "movies",
            MediaType::Show => "tv",
        }
    }

    /// Human label for logs and reports.
    pub fn label(self) -> &'static str {
        match self {
            MediaType::Movie => "movies",
            MediaType::Show => "shows",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MediaType {
    type Err = CurateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "movies" => Ok(MediaType::Movie),
            "tv" | "show" | "shows" => Ok(MediaType::Show),
            other => Err(CurateError::Config {
                field: "media type".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Feeds
// =============================================================================

/// A paginated discover endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    /// `discover/movies` or `discover/tv`: every result belongs to one category.
    Category(MediaType),
    /// `discover/trending`: movies and shows interleaved.
    Trending,
}

impl Feed {
    pub fn path_segment(self) -> &'static str {
        match self {
            Feed::Category(media_type) => media_type.discover_segment(),
            Feed::Trending => "trending",
        }
    }

    /// Media type to assume when a result omits `mediaType`.
    pub fn implied_media_type(self) -> Option<MediaType> {
        match self {
            Feed::Category(media_type) => Some(media_type),
            Feed::Trending => None,
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

// =============================================================================
// Candidate Item
// =============================================================================

/// One discovered movie or show, normalized at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub media_type: MediaType,
    pub id: MediaId,
    /// `title` for movies, `name` for shows.
    pub title: String,
    /// Raw release or first-air date, kept for log lines.
    pub release_date: Option<String>,
    /// [`UNKNOWN_YEAR`] when the date could not be parsed.
    pub release_year: i32,
    pub original_language: String,
    pub genre_ids: Vec<u32>,
    pub overview: String,
    /// External quality score on a 0-10 scale.
    ///
    /// Only the inclusion filter writes this, and only after every cheaper
    /// rule passed and the rating service returned a number.
    pub rating: Option<f32>,
}

impl CandidateItem {
    /// Start a candidate with empty metadata. Mostly useful in tests.
    pub fn new(media_type: MediaType, id: MediaId, title: impl Into<String>) -> Self {
        Self {
            media_type,
            id,
            title: title.into(),
            release_date: None,
            release_year: UNKNOWN_YEAR,
            original_language: String::new(),
            genre_ids: Vec::new(),
            overview: String::new(),
            rating: None,
        }
    }

    /// Year formatted for display, `????` when unknown.
    pub fn year_label(&self) -> String {
        if self.release_year == UNKNOWN_YEAR {
            "????".to_string()
        } else {
            self.release_year.to_string()
        }
    }
}

impl fmt::Display for CandidateItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.year_label())
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// One page of a discover endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoverPage {
    #[serde(default)]
    pub results: Vec<RawDiscoverItem>,
}

/// A discover result exactly as the service sends it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDiscoverItem {
    pub id: MediaId,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub overview: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_wire_names() {
        assert_eq!(MediaType::Movie.wire_name(), "movie");
        assert_eq!(MediaType::Show.wire_name(), "tv");
        assert_eq!(MediaType::Movie.discover_segment(), "movies");
        assert_eq!(Feed::Trending.path_segment(), "trending");
        assert_eq!(Feed::Category(MediaType::Show).path_segment(), "tv");
    }

    #[test]
    fn media_type_parses_loose_spellings() {
        assert_eq!("Movies".parse::<MediaType>().unwrap(), MediaType::Movie);
        assert_eq!(" tv ".parse::<MediaType>().unwrap(), MediaType::Show);
        assert_eq!("show".parse::<MediaType>().unwrap(), MediaType::Show);
        assert!("person".parse::<MediaType>().is_err());
    }

    #[test]
    fn media_type_serializes_like_the_api() {
        let json = serde_json::to_string(&MediaType::Show).unwrap();
        assert_eq!(json, "\"tv\"");
        let parsed: MediaType = serde_json::from_str("\"movie\"").unwrap();
        assert_eq!(parsed, MediaType::Movie);
    }

    #[test]
    fn display_uses_placeholder_for_unknown_year() {
        let mut item = CandidateItem::new(MediaType::Movie, 1, "Heat");
        assert_eq!(item.to_string(), "Heat (????)");
        item.release_year = 1995;
        assert_eq!(item.to_string(), "Heat (1995)");
    }
}
