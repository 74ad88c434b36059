//! Filter to drop titles in any excluded genre.
//!
//! Genre ids are the discovery service's numeric ids (TMDB ids for Seerr),
//! e.g. 99 Documentary, 10767 Talk, 35 Comedy.

use crate::traits::{Exclusion, Filter};
use catalog::{CandidateItem, FilterRuleSet};

/// Drops candidates whose genres intersect `rules.excluded_genres`.
pub struct ExcludedGenreFilter;

impl Filter for ExcludedGenreFilter {
    fn name(&self) -> &str {
        "ExcludedGenreFilter"
    }

    fn check(&self, item: &CandidateItem, rules: &FilterRuleSet) -> Result<(), Exclusion> {
        let matched = rules.matching_genres(&item.genre_ids);
        if matched.is_empty() {
            Ok(())
        } else {
            Err(Exclusion::Genre { matched })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::MediaType;

    fn item_with(genres: &[u32]) -> CandidateItem {
        let mut item = CandidateItem::new(MediaType::Movie, 1, "Test Movie");
        item.genre_ids = genres.to_vec();
        item
    }

    #[test]
    fn test_excluded_genre_filter() {
        let rules = FilterRuleSet::default();
        let filter = ExcludedGenreFilter;

        assert!(filter.check(&item_with(&[28, 12]), &rules).is_ok()); // Action/Adventure
        assert!(filter.check(&item_with(&[]), &rules).is_ok());
        assert_eq!(
            filter.check(&item_with(&[18, 99]), &rules), // Drama + Documentary
            Err(Exclusion::Genre { matched: vec![99] })
        );
    }
}
