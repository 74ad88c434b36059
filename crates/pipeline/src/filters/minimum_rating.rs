//! The rating threshold, the only rule that needs the network.
//!
//! Not a `Filter`: it is async and costs one external lookup, and the
//! inclusion filter always runs it last.

use crate::traits::{Exclusion, RatingResolver};
use catalog::{CandidateItem, FilterRuleSet};
use std::sync::Arc;
use tracing::debug;

/// Drops candidates with an unknown rating or one below `rules.min_rating`.
///
/// ## Algorithm
/// 1. Ask the resolver for the item's title and release year
/// 2. Attach any numeric result to the item
/// 3. Keep only if a rating came back and it is >= min_rating
#[derive(Clone)]
pub struct MinimumRatingCheck {
    resolver: Arc<dyn RatingResolver>,
}

impl MinimumRatingCheck {
    pub fn new(resolver: Arc<dyn RatingResolver>) -> Self {
        Self { resolver }
    }

    pub fn name(&self) -> &str {
        "MinimumRatingCheck"
    }

    /// Returns the accepted rating.
    pub async fn check(
        &self,
        item: &mut CandidateItem,
        rules: &FilterRuleSet,
    ) -> Result<f32, Exclusion> {
        let rating = self.resolver.resolve(&item.title, item.release_year).await;
        debug!("Rating for {}: {:?}", item, rating);

        let Some(rating) = rating else {
            return Err(Exclusion::RatingUnknown);
        };
        item.rating = Some(rating);

        if rating >= rules.min_rating {
            Ok(rating)
        } else {
            Err(Exclusion::RatingBelowThreshold {
                rating,
                min_rating: rules.min_rating,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog::MediaType;
    use std::collections::HashMap;

    struct TableResolver(HashMap<String, f32>);

    #[async_trait]
    impl RatingResolver for TableResolver {
        async fn resolve(&self, title: &str, _year: i32) -> Option<f32> {
            self.0.get(title).copied()
        }
    }

    fn build_check() -> MinimumRatingCheck {
        let table = HashMap::from([
            ("High Rated Movie".to_string(), 8.1),
            ("Borderline Movie".to_string(), 7.0),
            ("Low Rated Movie".to_string(), 4.2),
        ]);
        MinimumRatingCheck::new(Arc::new(TableResolver(table)))
    }

    #[tokio::test]
    async fn test_minimum_rating_check() {
        let check = build_check();
        let rules = FilterRuleSet::default(); // min_rating 7.0

        let mut high = CandidateItem::new(MediaType::Movie, 1, "High Rated Movie");
        assert_eq!(check.check(&mut high, &rules).await, Ok(8.1));
        assert_eq!(high.rating, Some(8.1));

        let mut borderline = CandidateItem::new(MediaType::Movie, 2, "Borderline Movie");
        assert_eq!(check.check(&mut borderline, &rules).await, Ok(7.0));

        let mut low = CandidateItem::new(MediaType::Movie, 3, "Low Rated Movie");
        assert_eq!(
            check.check(&mut low, &rules).await,
            Err(Exclusion::RatingBelowThreshold {
                rating: 4.2,
                min_rating: 7.0
            })
        );
        assert_eq!(low.rating, Some(4.2));
    }

    #[tokio::test]
    async fn test_unknown_rating_always_fails() {
        let check = build_check();
        let mut rules = FilterRuleSet::default();
        rules.min_rating = 0.0;

        let mut missing = CandidateItem::new(MediaType::Show, 4, "Not In Table");
        assert_eq!(
            check.check(&mut missing, &rules).await,
            Err(Exclusion::RatingUnknown)
        );
        assert!(missing.rating.is_none());
    }
}
