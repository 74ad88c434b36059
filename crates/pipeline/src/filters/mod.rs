//! Rule implementations for the inclusion filter.
//!
//! The four local rules implement `Filter` and are composed into a
//! `FilterPipeline`. The rating threshold is a separate async check.

pub mod excluded_genre;
pub mod excluded_keyword;
pub mod language;
pub mod minimum_rating;
pub mod release_year;

// Re-export for convenience
pub use excluded_genre::ExcludedGenreFilter;
pub use excluded_keyword::ExcludedKeywordFilter;
pub use language::LanguageFilter;
pub use minimum_rating::MinimumRatingCheck;
pub use release_year::ReleaseYearFilter;
