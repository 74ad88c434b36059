//! Filter to drop titles released before the configured year.
//!
//! Items with an unparseable date carry year 0 and therefore fail unless the
//! threshold is 0 or below.

use crate::traits::{Exclusion, Filter};
use catalog::{CandidateItem, FilterRuleSet};

/// Keeps candidates whose release year is at least `rules.min_year`.
pub struct ReleaseYearFilter;

impl Filter for ReleaseYearFilter {
    fn name(&self) -> &str {
        "ReleaseYearFilter"
    }

    fn check(&self, item: &CandidateItem, rules: &FilterRuleSet) -> Result<(), Exclusion> {
        if item.release_year >= rules.min_year {
            Ok(())
        } else {
            Err(Exclusion::ReleaseYear {
                year: item.release_year,
                min_year: rules.min_year,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{MediaType, UNKNOWN_YEAR};

    fn item_from(year: i32) -> CandidateItem {
        let mut item = CandidateItem::new(MediaType::Movie, 1, "Test Movie");
        item.release_year = year;
        item
    }

    #[test]
    fn test_release_year_filter() {
        let rules = FilterRuleSet::default(); // min_year 2000
        let filter = ReleaseYearFilter;

        assert!(filter.check(&item_from(2000), &rules).is_ok()); // inclusive
        assert!(filter.check(&item_from(2023), &rules).is_ok());
        assert_eq!(
            filter.check(&item_from(1999), &rules),
            Err(Exclusion::ReleaseYear { year: 1999, min_year: 2000 })
        );
    }

    #[test]
    fn test_unknown_year_passes_only_non_positive_threshold() {
        let filter = ReleaseYearFilter;
        let mut rules = FilterRuleSet::default();
        assert!(filter.check(&item_from(UNKNOWN_YEAR), &rules).is_err());

        rules.min_year = 0;
        assert!(filter.check(&item_from(UNKNOWN_YEAR), &rules).is_ok());
    }
}
