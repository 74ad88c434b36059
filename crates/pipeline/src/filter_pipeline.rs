//! The inclusion filter: local rules first, rating lookup last.
//!
//! `FilterPipeline` chains the cheap `Filter`s with the builder pattern and
//! stops at the first failure. `InclusionFilter` runs that pipeline and, only
//! if everything passed, spends one rating lookup.

use crate::filters::{
    ExcludedGenreFilter, ExcludedKeywordFilter, LanguageFilter, MinimumRatingCheck,
    ReleaseYearFilter,
};
use crate::traits::{Exclusion, Filter, RatingResolver};
use catalog::{CandidateItem, FilterRuleSet};
use std::sync::Arc;
use tracing::debug;

/// Chains local filters into a short-circuiting pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(ReleaseYearFilter)
///     .add_filter(LanguageFilter);
///
/// pipeline.check(&item, &rules)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Year, language, genre, keyword: the fixed evaluation order.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(ReleaseYearFilter)
            .add_filter(LanguageFilter)
            .add_filter(ExcludedGenreFilter)
            .add_filter(ExcludedKeywordFilter)
    }

    /// Add a filter to the end of the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run filters in order, returning the first exclusion.
    ///
    /// Does not log; the caller reports the exclusion once.
    pub fn check(&self, item: &CandidateItem, rules: &FilterRuleSet) -> Result<(), Exclusion> {
        for filter in &self.filters {
            filter.check(item, rules)?;
        }
        Ok(())
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Decides keep/drop for one candidate.
///
/// ## Algorithm
/// 1. Run the local `FilterPipeline`; stop at the first failing rule
/// 2. Only then resolve the external rating
/// 3. Keep when the rating is known and meets `rules.min_rating`
pub struct InclusionFilter {
    local: FilterPipeline,
    rating: MinimumRatingCheck,
}

impl InclusionFilter {
    /// Standard rule order backed by `resolver`.
    pub fn new(resolver: Arc<dyn RatingResolver>) -> Self {
        Self::with_pipeline(FilterPipeline::standard(), resolver)
    }

    pub fn with_pipeline(local: FilterPipeline, resolver: Arc<dyn RatingResolver>) -> Self {
        Self {
            local,
            rating: MinimumRatingCheck::new(resolver),
        }
    }

    /// Full verdict. On success returns the rating that was attached to the item.
    pub async fn evaluate(
        &self,
        item: &mut CandidateItem,
        rules: &FilterRuleSet,
    ) -> Result<f32, Exclusion> {
        self.local.check(item, rules)?;
        self.rating.check(item, rules).await
    }

    /// Boolean form of [`evaluate`](Self::evaluate); logs the exclusion reason at debug.
    pub async fn include(&self, item: &mut CandidateItem, rules: &FilterRuleSet) -> bool {
        match self.evaluate(item, rules).await {
            Ok(_) => true,
            Err(exclusion) => {
                debug!("Excluded {}: {}", item, exclusion);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog::MediaType;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Resolver that returns a fixed answer and counts lookups.
    struct CountingResolver {
        answer: Option<f32>,
        calls: AtomicUsize,
    }

    impl CountingResolver {
        fn new(answer: Option<f32>) -> Arc<Self> {
            Arc::new(Self {
                answer,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RatingResolver for CountingResolver {
        async fn resolve(&self, _title: &str, _year: i32) -> Option<f32> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer
        }
    }

    fn passing_item() -> CandidateItem {
        let mut item = CandidateItem::new(MediaType::Movie, 27205, "Inception");
        item.release_year = 2010;
        item.original_language = "en".to_string();
        item.genre_ids = vec![28, 878, 12];
        item.overview = "A thief who steals corporate secrets through dreams.".to_string();
        item
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        assert!(pipeline.is_empty());
        let mut item = passing_item();
        item.release_year = 1900;
        assert!(pipeline.check(&item, &FilterRuleSet::default()).is_ok());
    }

    #[test]
    fn test_single_filter() {
        let pipeline = FilterPipeline::new().add_filter(LanguageFilter);
        let mut item = passing_item();
        item.original_language = "fr".to_string();
        item.release_year = 1900; // not checked by this pipeline

        let result = pipeline.check(&item, &FilterRuleSet::default());
        assert!(matches!(result, Err(Exclusion::Language { .. })));
    }

    #[test]
    fn test_first_failure_wins() {
        let mut item = passing_item();
        item.release_year = 1980;
        item.original_language = "ja".to_string();

        let result = FilterPipeline::standard().check(&item, &FilterRuleSet::default());
        assert!(matches!(result, Err(Exclusion::ReleaseYear { .. })));
    }

    #[tokio::test]
    async fn test_include_attaches_rating() {
        let resolver = CountingResolver::new(Some(8.8));
        let filter = InclusionFilter::new(resolver.clone());
        let mut item = passing_item();

        assert!(filter.include(&mut item, &FilterRuleSet::default()).await);
        assert_eq!(item.rating, Some(8.8));
        assert_eq!(resolver.calls(), 1);
    }

    #[tokio::test]
    async fn test_rule_independence() {
        // Break one rule at a time; every variant must be rejected
        let rules = FilterRuleSet::default();

        for rule in ["year", "language", "genre", "keyword"] {
            let resolver = CountingResolver::new(Some(9.5));
            let filter = InclusionFilter::new(resolver.clone());
            let mut item = passing_item();
            match rule {
                "year" => item.release_year = 1999,
                "language" => item.original_language = "de".to_string(),
                "genre" => item.genre_ids.push(10764),
                _ => item.overview.push_str(" Live wrestling tonight."),
            }

            assert!(
                !filter.include(&mut item, &rules).await,
                "breaking the {} rule should exclude the item",
                rule
            );
            assert_eq!(resolver.calls(), 0, "{} failure must not trigger a lookup", rule);
            assert!(item.rating.is_none());
        }

        // Rating rules: unknown and below threshold
        for answer in [None, Some(6.9)] {
            let filter = InclusionFilter::new(CountingResolver::new(answer));
            let mut item = passing_item();
            assert!(!filter.include(&mut item, &rules).await);
        }
    }

    #[tokio::test]
    async fn test_include_is_idempotent() {
        let rules = FilterRuleSet::default();
        let filter = InclusionFilter::new(CountingResolver::new(Some(7.3)));

        let mut accepted = passing_item();
        let first = filter.include(&mut accepted, &rules).await;
        let second = filter.include(&mut accepted, &rules).await;
        assert_eq!(first, second);
        assert!(first);

        let mut rejected = passing_item();
        rejected.genre_ids = vec![99];
        let first = filter.include(&mut rejected, &rules).await;
        let second = filter.include(&mut rejected, &rules).await;
        assert_eq!(first, second);
        assert!(!first);
    }

    /// Counts every event emitted while it is the default subscriber.
    #[derive(Clone, Default)]
    struct EventCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCounter {
        fn on_event(
            &self,
            _event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_local_exclusion_is_logged_once() {
        use tracing_subscriber::layer::SubscriberExt;

        let counter = EventCounter::default();
        let subscriber = tracing_subscriber::registry().with(counter.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let filter = InclusionFilter::new(CountingResolver::new(Some(9.0)));
        let mut item = passing_item();
        item.original_language = "it".to_string();

        assert!(!filter.include(&mut item, &FilterRuleSet::default()).await);
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_evaluate_reports_reason() {
        let filter = InclusionFilter::new(CountingResolver::new(Some(5.0)));
        let mut item = passing_item();

        let verdict = filter.evaluate(&mut item, &FilterRuleSet::default()).await;
        assert_eq!(
            verdict,
            Err(Exclusion::RatingBelowThreshold {
                rating: 5.0,
                min_rating: 7.0
            })
        );
    }
}
