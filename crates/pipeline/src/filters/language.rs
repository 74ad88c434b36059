//! Filter to keep only titles in the target original language.

use crate::traits::{Exclusion, Filter};
use catalog::{CandidateItem, FilterRuleSet};

/// Exact, case-sensitive match on `original_language`.
pub struct LanguageFilter;

impl Filter for LanguageFilter {
    fn name(&self) -> &str {
        "LanguageFilter"
    }

    fn check(&self, item: &CandidateItem, rules: &FilterRuleSet) -> Result<(), Exclusion> {
        if item.original_language == rules.target_language {
            Ok(())
        } else {
            Err(Exclusion::Language {
                found: item.original_language.clone(),
                wanted: rules.target_language.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::MediaType;

    fn item_in(language: &str) -> CandidateItem {
        let mut item = CandidateItem::new(MediaType::Show, 1, "Test Show");
        item.original_language = language.to_string();
        item
    }

    #[test]
    fn test_language_filter() {
        let rules = FilterRuleSet::default(); // "en"
        let filter = LanguageFilter;

        assert!(filter.check(&item_in("en"), &rules).is_ok());
        assert!(filter.check(&item_in("ko"), &rules).is_err());
        assert!(filter.check(&item_in(""), &rules).is_err());
    }

    #[test]
    fn test_language_match_is_case_sensitive() {
        let rules = FilterRuleSet::default();
        assert_eq!(
            LanguageFilter.check(&item_in("EN"), &rules),
            Err(Exclusion::Language {
                found: "EN".to_string(),
                wanted: "en".to_string()
            })
        );
    }
}
