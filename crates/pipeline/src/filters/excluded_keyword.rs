//! Filter to drop titles whose overview mentions an excluded keyword.

use crate::traits::{Exclusion, Filter};
use catalog::{CandidateItem, FilterRuleSet};

/// Case-insensitive substring match against the overview.
pub struct ExcludedKeywordFilter;

impl Filter for ExcludedKeywordFilter {
    fn name(&self) -> &str {
        "ExcludedKeywordFilter"
    }

    fn check(&self, item: &CandidateItem, rules: &FilterRuleSet) -> Result<(), Exclusion> {
        match rules.matching_keyword(&item.overview) {
            None => Ok(()),
            Some(keyword) => Err(Exclusion::Keyword {
                keyword: keyword.to_string(),
            }),
        }
    }
}
