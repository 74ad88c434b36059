//! The immutable rule set every candidate is judged against.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Quality and content criteria, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRuleSet {
    /// Inclusive lower bound on the release year.
    pub min_year: i32,
    /// Required original language, compared exactly.
    pub target_language: String,
    /// Any overlap with an item's genres drops the item.
    pub excluded_genres: BTreeSet<u32>,
    /// Lowercased substrings that must not appear in the overview.
    excluded_keywords: Vec<String>,
    /// Inclusive lower bound on the external 0-10 rating.
    pub min_rating: f32,
}

impl FilterRuleSet {
    /// Build a rule set.
    ///
    /// Keywords are trimmed and lowercased, and blank ones are dropped.
    /// Matching is a plain substring test, so padding a keyword with spaces
    /// does not make it match whole words only: `" soap "` is stored as
    /// `"soap"` and still matches "soapbox".
    pub fn new(
        min_year: i32,
        target_language: impl Into<String>,
        excluded_genres: impl IntoIterator<Item = u32>,
        excluded_keywords: impl IntoIterator<Item = impl AsRef<str>>,
        min_rating: f32,
    ) -> Self {
        let excluded_keywords = excluded_keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        Self {
            min_year,
            target_language: target_language.into(),
            excluded_genres: excluded_genres.into_iter().collect(),
            excluded_keywords,
            min_rating,
        }
    }

    pub fn excluded_keywords(&self) -> &[String] {
        &self.excluded_keywords
    }

    /// First excluded keyword found in `overview`, ignoring case.
    pub fn matching_keyword(&self, overview: &str) -> Option<&str> {
        if self.excluded_keywords.is_empty() {
            return None;
        }
        let overview = overview.to_lowercase();
        self.excluded_keywords
            .iter()
            .find(|k| overview.contains(k.as_str()))
            .map(String::as_str)
    }

    /// Excluded genres present in `genre_ids`, in ascending order.
    pub fn matching_genres(&self, genre_ids: &[u32]) -> Vec<u32> {
        let found: BTreeSet<u32> = genre_ids
            .iter()
            .copied()
            .filter(|g| self.excluded_genres.contains(g))
            .collect();
        found.into_iter().collect()
    }
}

impl Default for FilterRuleSet {
    /// Documentary, talk show, news, comedy and reality are excluded, as are
    /// wrestling and soap operas.
    fn default() -> Self {
        Self::new(
            2000,
            "en",
            [99, 10767, 10763, 35, 10764],
            ["wrestling", "soap opera", "soap"],
            7.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_stored_lowercased_and_trimmed() {
        let rules = FilterRuleSet::new(2000, "en", [], ["  Wrestling ", "", "SOAP"], 6.0);
        assert_eq!(rules.excluded_keywords(), &["wrestling".to_string(), "soap".to_string()]);
    }

    #[test]
    fn padded_keyword_is_still_a_substring_match() {
        let rules = FilterRuleSet::new(2000, "en", [], [" soap "], 6.0);
        assert_eq!(rules.excluded_keywords(), &["soap".to_string()]);
        assert_eq!(rules.matching_keyword("A comedian on a soapbox"), Some("soap"));
    }

    #[test]
    fn keyword_match_ignores_case() {
        let rules = FilterRuleSet::default();
        assert_eq!(
            rules.matching_keyword("The greatest WRESTLING event of the year"),
            Some("wrestling")
        );
        assert_eq!(rules.matching_keyword("A quiet drama about a lighthouse"), None);
        assert_eq!(rules.matching_keyword(""), None);
    }

    #[test]
    fn genre_match_reports_overlap() {
        let rules = FilterRuleSet::default();
        assert_eq!(rules.matching_genres(&[18, 35, 99, 35]), vec![35, 99]);
        assert!(rules.matching_genres(&[18, 80]).is_empty());
        assert!(rules.matching_genres(&[]).is_empty());
    }
}
