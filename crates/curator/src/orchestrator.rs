//! # Session Orchestrator
//!
//! Runs one curation session:
//! 1. Log in once; a failed login aborts the run before anything is fetched
//! 2. Collect each configured category in order, or fill them all from one
//!    pass over the trending feed
//! 3. Dispatch requests as items are accepted (inside the collector)
//! 4. Log the final counts per category and return a `RunReport`
//!
//! Everything is sequential: one network round trip at a time.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use catalog::{CurateError, Feed, MediaType};
use pipeline::{
    Authenticator, Collected, DiscoveryFeed, InclusionFilter, PaginatedCollector,
    RatingResolver, RequestDispatcher, RequestSink,
};

use crate::config::{CurateConfig, FeedMode};
use crate::report::{CategoryReport, RunReport};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Unauthenticated,
    Authenticated,
    /// Paging through this feed.
    Collecting(Feed),
    Done,
    Aborted,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Unauthenticated => f.write_str("unauthenticated"),
            RunState::Authenticated => f.write_str("authenticated"),
            RunState::Collecting(feed) => write!(f, "collecting {}", feed),
            RunState::Done => f.write_str("done"),
            RunState::Aborted => f.write_str("aborted"),
        }
    }
}

/// The outside-world seams a session talks through.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn Authenticator>,
    pub feed: Arc<dyn DiscoveryFeed>,
    pub resolver: Arc<dyn RatingResolver>,
    pub sink: Arc<dyn RequestSink>,
}

impl Services {
    /// One session object serving login, discovery and requests.
    pub fn from_session<S>(session: Arc<S>, resolver: Arc<dyn RatingResolver>) -> Self
    where
        S: Authenticator + DiscoveryFeed + RequestSink + 'static,
    {
        Self {
            auth: session.clone(),
            feed: session.clone(),
            resolver,
            sink: session,
        }
    }
}

/// Drives one login-collect-report cycle.
pub struct SessionOrchestrator {
    config: CurateConfig,
    services: Services,
    state: RunState,
}

impl SessionOrchestrator {
    pub fn new(config: CurateConfig, services: Services) -> Self {
        Self {
            config,
            services,
            state: RunState::Unauthenticated,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn config(&self) -> &CurateConfig {
        &self.config
    }

    /// Run the session to completion.
    ///
    /// A session runs once; calling `run` again returns an aborted report
    /// without touching any service.
    pub async fn run(&mut self) -> RunReport {
        if self.state != RunState::Unauthenticated {
            warn!("Session already ran (state: {})", self.state);
            return RunReport::aborted(CurateError::Config {
                field: "session".to_string(),
                value: self.state.to_string(),
            });
        }

        let start_time = Instant::now();

        if let Err(e) = self.services.auth.login().await {
            error!("Login failed: {}", e);
            self.state = RunState::Aborted;
            return RunReport::aborted(e);
        }
        self.state = RunState::Authenticated;

        let collector = PaginatedCollector::new(
            self.services.feed.clone(),
            InclusionFilter::new(self.services.resolver.clone()),
        )
        .with_page_delay(self.config.page_delay);
        let mut dispatcher = RequestDispatcher::new(self.services.sink.clone())
            .with_enabled(self.config.requests_enabled)
            .with_delay(self.config.dispatch_delay);

        if !dispatcher.is_enabled() {
            info!("Requests disabled, running dry");
        }

        let collected = match self.config.feed_mode {
            FeedMode::Category => self.collect_categories(&collector, &mut dispatcher).await,
            FeedMode::Trending => self.collect_trending(&collector, &mut dispatcher).await,
        };

        let categories: Vec<CategoryReport> = collected
            .into_iter()
            .map(|c| {
                let category = c.category;
                let failures = dispatcher
                    .records()
                    .iter()
                    .filter(|r| r.media_type == category)
                    .filter_map(|r| r.outcome.rejection())
                    .collect();
                CategoryReport::new(c, dispatcher.counts_for(category), failures)
            })
            .collect();

        for report in &categories {
            info!(
                "{}: {}/{} accepted, {} requested, {} rejected, {} skipped ({}, {} pages)",
                report.category,
                report.items.len(),
                report.target,
                report.dispatch.accepted,
                report.dispatch.rejected,
                report.dispatch.skipped,
                report.stop,
                report.pages_fetched
            );
        }
        info!("Curation finished in {:.2?}", start_time.elapsed());

        self.state = RunState::Done;
        RunReport {
            categories,
            fatal: None,
        }
    }

    async fn collect_categories(
        &mut self,
        collector: &PaginatedCollector,
        dispatcher: &mut RequestDispatcher,
    ) -> Vec<Collected> {
        let categories: Vec<MediaType> = self.config.categories.clone();
        let mut collected = Vec::with_capacity(categories.len());
        for category in categories {
            self.state = RunState::Collecting(Feed::Category(category));
            info!("Collecting {} (target {})", category, self.config.target_count);
            collected.push(
                collector
                    .collect(
                        category,
                        self.config.target_count,
                        self.config.max_pages,
                        &self.config.rules,
                        dispatcher,
                    )
                    .await,
            );
        }
        collected
    }

    async fn collect_trending(
        &mut self,
        collector: &PaginatedCollector,
        dispatcher: &mut RequestDispatcher,
    ) -> Vec<Collected> {
        let targets: Vec<(MediaType, usize)> = self
            .config
            .categories
            .iter()
            .map(|&category| (category, self.config.target_count))
            .collect();

        self.state = RunState::Collecting(Feed::Trending);
        info!(
            "Collecting {} per category from the trending feed",
            self.config.target_count
        );
        collector
            .collect_mixed(&targets, self.config.max_pages, &self.config.rules, dispatcher)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog::CandidateItem;
    use pipeline::DispatchOutcome;

    struct Offline;

    #[async_trait]
    impl Authenticator for Offline {
        async fn login(&self) -> Result<(), CurateError> {
            Ok(())
        }
    }

    #[async_trait]
    impl DiscoveryFeed for Offline {
        async fn fetch_page(&self, _feed: Feed, _page: u32) -> Result<Vec<CandidateItem>, CurateError> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl RequestSink for Offline {
        async fn submit(&self, _item: &CandidateItem) -> DispatchOutcome {
            DispatchOutcome::Accepted
        }
    }

    #[async_trait]
    impl RatingResolver for Offline {
        async fn resolve(&self, _title: &str, _year: i32) -> Option<f32> {
            None
        }
    }

    fn orchestrator(config: CurateConfig) -> SessionOrchestrator {
        let offline = Arc::new(Offline);
        SessionOrchestrator::new(config, Services::from_session(offline.clone(), offline))
    }

    #[tokio::test]
    async fn test_state_moves_to_done() {
        let mut orchestrator = orchestrator(CurateConfig::default());
        assert_eq!(orchestrator.state(), RunState::Unauthenticated);

        let report = orchestrator.run().await;

        assert!(report.is_success());
        assert_eq!(orchestrator.state(), RunState::Done);
        assert_eq!(report.categories.len(), 2);
    }

    #[tokio::test]
    async fn test_second_run_is_refused() {
        let mut orchestrator = orchestrator(CurateConfig::default());
        orchestrator.run().await;

        let again = orchestrator.run().await;
        assert!(!again.is_success());
        assert_eq!(orchestrator.state(), RunState::Done);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(RunState::Collecting(Feed::Trending).to_string(), "collecting trending");
        assert_eq!(
            RunState::Collecting(Feed::Category(MediaType::Movie)).to_string(),
            "collecting movies"
        );
    }
}
