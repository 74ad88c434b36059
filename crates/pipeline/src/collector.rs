//! Paginated collection: fetch, filter, accumulate, stop.
//!
//! ## Algorithm
//! 1. Start the page cursor at 1
//! 2. Fetch one page; a failed fetch or an empty page ends the scan
//! 3. Run every item through the inclusion filter in page order
//! 4. Append each accepted item and dispatch it immediately
//! 5. Stop scanning as soon as the target is met
//! 6. Otherwise advance the cursor, until it passes `max_pages`
//!
//! Because items are dispatched as they are accepted, the number of
//! acquisition requests never exceeds the target no matter how many pages
//! have to be scanned.

use crate::dispatcher::RequestDispatcher;
use crate::filter_pipeline::InclusionFilter;
use crate::traits::DiscoveryFeed;
use catalog::{CandidateItem, Feed, FilterRuleSet, MediaId, MediaType};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Why a collection pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The target was zero; nothing was fetched.
    NothingRequested,
    TargetReached,
    /// A page came back with no results.
    FeedExhausted,
    PageBudgetExhausted,
    /// A page fetch failed; whatever was accumulated is kept.
    FetchFailed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StopReason::NothingRequested => "nothing requested",
            StopReason::TargetReached => "target reached",
            StopReason::FeedExhausted => "feed exhausted",
            StopReason::PageBudgetExhausted => "page budget exhausted",
            StopReason::FetchFailed => "fetch failed",
        };
        f.write_str(text)
    }
}

/// Accepted items for one category, in acceptance order.
#[derive(Debug, Clone, PartialEq)]
pub struct Collected {
    pub category: MediaType,
    pub target: usize,
    pub items: Vec<CandidateItem>,
    pub pages_fetched: u32,
    pub stop: StopReason,
}

impl Collected {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn nothing_requested(category: MediaType, target: usize) -> Self {
        Self {
            category,
            target,
            items: Vec::new(),
            pages_fetched: 0,
            stop: StopReason::NothingRequested,
        }
    }
}

/// Accumulator for one category during a scan.
struct Bucket {
    category: MediaType,
    target: usize,
    items: Vec<CandidateItem>,
}

impl Bucket {
    fn new(category: MediaType, target: usize) -> Self {
        Self {
            category,
            target,
            items: Vec::with_capacity(target.min(64)),
        }
    }

    fn is_full(&self) -> bool {
        self.items.len() >= self.target
    }
}

/// Drives a discover feed page by page.
pub struct PaginatedCollector {
    feed: Arc<dyn DiscoveryFeed>,
    filter: InclusionFilter,
    page_delay: Duration,
}

impl PaginatedCollector {
    pub fn new(feed: Arc<dyn DiscoveryFeed>, filter: InclusionFilter) -> Self {
        Self {
            feed,
            filter,
            page_delay: Duration::ZERO,
        }
    }

    /// Pause between consecutive page fetches.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Collect up to `target_count` items of one category from its own feed.
    ///
    /// # Arguments
    /// * `category` - Which discover feed to page through
    /// * `target_count` - Accepted items wanted; 0 fetches nothing
    /// * `max_pages` - Last page number that may be fetched
    /// * `rules` - Inclusion rules for every item
    /// * `dispatcher` - Receives each item the moment it is accepted
    ///
    /// # Returns
    /// The accepted items in order. There are fewer than `target_count` when
    /// the page budget runs out, the feed returns an empty page, or a fetch
    /// fails; none of those is an error.
    #[instrument(skip(self, rules, dispatcher))]
    pub async fn collect(
        &self,
        category: MediaType,
        target_count: usize,
        max_pages: u32,
        rules: &FilterRuleSet,
        dispatcher: &mut RequestDispatcher,
    ) -> Collected {
        if target_count == 0 {
            return Collected::nothing_requested(category, target_count);
        }

        let mut buckets = [Bucket::new(category, target_count)];
        let (pages_fetched, stop) = self
            .scan(Feed::Category(category), &mut buckets, max_pages, rules, dispatcher)
            .await;

        let [bucket] = buckets;
        Collected {
            category,
            target: target_count,
            items: bucket.items,
            pages_fetched,
            stop,
        }
    }

    /// Fill several categories from the mixed trending feed in one pass.
    ///
    /// Each item is routed by its media type. Items whose category is full,
    /// or was not asked for, are skipped before any rating lookup. Results
    /// come back in the order of `targets`.
    #[instrument(skip(self, targets, rules, dispatcher))]
    pub async fn collect_mixed(
        &self,
        targets: &[(MediaType, usize)],
        max_pages: u32,
        rules: &FilterRuleSet,
        dispatcher: &mut RequestDispatcher,
    ) -> Vec<Collected> {
        let mut buckets: Vec<Bucket> = targets
            .iter()
            .map(|&(category, target)| Bucket::new(category, target))
            .collect();

        let (pages_fetched, stop) = if buckets.iter().all(Bucket::is_full) {
            (0, StopReason::NothingRequested)
        } else {
            self.scan(Feed::Trending, &mut buckets, max_pages, rules, dispatcher)
                .await
        };

        buckets
            .into_iter()
            .map(|bucket| {
                if bucket.target == 0 {
                    return Collected::nothing_requested(bucket.category, 0);
                }
                let stop = if bucket.is_full() {
                    StopReason::TargetReached
                } else {
                    stop
                };
                Collected {
                    category: bucket.category,
                    target: bucket.target,
                    items: bucket.items,
                    pages_fetched,
                    stop,
                }
            })
            .collect()
    }

    /// Page loop shared by both collection modes.
    async fn scan(
        &self,
        feed: Feed,
        buckets: &mut [Bucket],
        max_pages: u32,
        rules: &FilterRuleSet,
        dispatcher: &mut RequestDispatcher,
    ) -> (u32, StopReason) {
        let mut seen: HashSet<(MediaType, MediaId)> = HashSet::new();
        let mut cursor: Option<u32> = Some(1).filter(|first| *first <= max_pages);
        let mut pages_fetched: u32 = 0;

        let stop = loop {
            if buckets.iter().all(Bucket::is_full) {
                break StopReason::TargetReached;
            }
            let Some(page) = cursor else {
                break StopReason::PageBudgetExhausted;
            };
            if page > 1 && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }

            let results = match self.feed.fetch_page(feed, page).await {
                Ok(results) => results,
                Err(e) => {
                    warn!("Failed to fetch {}: {}", feed, e);
                    break StopReason::FetchFailed;
                }
            };
            pages_fetched += 1;
            info!("Fetched page {} for {}: {} items", page, feed, results.len());

            if results.is_empty() {
                break StopReason::FeedExhausted;
            }

            for mut item in results {
                if buckets.iter().all(Bucket::is_full) {
                    break;
                }
                let Some(bucket) = buckets.iter_mut().find(|b| b.category == item.media_type)
                else {
                    debug!("Skipping {}: {} not requested from {}", item, item.media_type, feed);
                    continue;
                };
                if bucket.is_full() {
                    debug!("Skipping {}: {} already complete", item, bucket.category);
                    continue;
                }
                if !seen.insert((item.media_type, item.id)) {
                    debug!("Skipping {}: already seen on an earlier page", item);
                    continue;
                }

                if self.filter.include(&mut item, rules).await {
                    info!(
                        "Included: {} [{}] [rating {:.1}]",
                        item,
                        item.release_date.as_deref().unwrap_or("no date"),
                        item.rating.unwrap_or_default()
                    );
                    dispatcher.dispatch(&item).await;
                    bucket.items.push(item);
                }
            }

            cursor = next_page(page, max_pages);
        };

        debug!("Stopped scanning {} after {} pages: {}", feed, pages_fetched, stop);
        (pages_fetched, stop)
    }
}

/// The page after `page`, or `None` once the budget (or `u32`) runs out.
fn next_page(page: u32, max_pages: u32) -> Option<u32> {
    page.checked_add(1).filter(|next| *next <= max_pages)
}
