//! Run configuration: rules, bounds and feed selection for one session.

use catalog::{CurateError, FilterRuleSet, MediaType, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which discover endpoints a run pages through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedMode {
    /// Each category pages its own feed, one category after the other.
    #[default]
    Category,
    /// One pass over the mixed trending feed fills every category.
    Trending,
}

impl fmt::Display for FeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedMode::Category => f.write_str("category"),
            FeedMode::Trending => f.write_str("trending"),
        }
    }
}

impl FromStr for FeedMode {
    type Err = CurateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" | "categories" | "discover" => Ok(FeedMode::Category),
            "trending" => Ok(FeedMode::Trending),
            other => Err(CurateError::Config {
                field: "FEED_MODE".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Everything a session needs besides its services.
#[derive(Debug, Clone, PartialEq)]
pub struct CurateConfig {
    pub rules: FilterRuleSet,
    /// Accepted items wanted per category.
    pub target_count: usize,
    /// Last page number the collector may fetch.
    pub max_pages: u32,
    pub feed_mode: FeedMode,
    /// Categories in collection order.
    pub categories: Vec<MediaType>,
    /// `false` is a dry run: nothing is submitted.
    pub requests_enabled: bool,
    pub page_delay: Duration,
    pub dispatch_delay: Duration,
}

impl Default for CurateConfig {
    fn default() -> Self {
        Self {
            rules: FilterRuleSet::default(),
            target_count: 10,
            max_pages: 300,
            feed_mode: FeedMode::Category,
            categories: vec![MediaType::Movie, MediaType::Show],
            requests_enabled: true,
            page_delay: Duration::ZERO,
            dispatch_delay: Duration::ZERO,
        }
    }
}

impl CurateConfig {
    /// Reject configurations no run could make sense of.
    ///
    /// Repeated categories are collapsed, keeping the first position.
    pub fn validated(mut self) -> Result<Self> {
        if self.max_pages == 0 {
            return Err(CurateError::Config {
                field: "MAX_PAGES".to_string(),
                value: "0".to_string(),
            });
        }
        if !self.rules.min_rating.is_finite() || !(0.0..=10.0).contains(&self.rules.min_rating) {
            return Err(CurateError::Config {
                field: "MIN_RATING".to_string(),
                value: self.rules.min_rating.to_string(),
            });
        }
        if self.categories.is_empty() {
            return Err(CurateError::Config {
                field: "CATEGORIES".to_string(),
                value: String::new(),
            });
        }

        let mut seen = Vec::with_capacity(self.categories.len());
        self.categories.retain(|c| {
            if seen.contains(c) {
                false
            } else {
                seen.push(*c);
                true
            }
        });
        Ok(self)
    }
}
