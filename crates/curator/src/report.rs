//! Summary of one curation run.

use catalog::{CandidateItem, CurateError, MediaType};
use pipeline::{Collected, DispatchCounts, StopReason};

/// What one category produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReport {
    pub category: MediaType,
    pub target: usize,
    /// Accepted items in acceptance order.
    pub items: Vec<CandidateItem>,
    pub pages_fetched: u32,
    pub stop: StopReason,
    pub dispatch: DispatchCounts,
    /// Rejection messages, in dispatch order.
    pub failures: Vec<CurateError>,
}

impl CategoryReport {
    pub fn new(collected: Collected, dispatch: DispatchCounts, failures: Vec<CurateError>) -> Self {
        Self {
            category: collected.category,
            target: collected.target,
            items: collected.items,
            pages_fetched: collected.pages_fetched,
            stop: collected.stop,
            dispatch,
            failures,
        }
    }

    /// Whether the category came up short of its target.
    pub fn is_short(&self) -> bool {
        self.items.len() < self.target
    }
}

/// Result of a whole session. `fatal` is set when the run was aborted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub categories: Vec<CategoryReport>,
    pub fatal: Option<CurateError>,
}

impl RunReport {
    pub fn aborted(error: CurateError) -> Self {
        Self {
            categories: Vec::new(),
            fatal: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.fatal.is_none()
    }

    pub fn category(&self, category: MediaType) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == category)
    }

    pub fn total_accepted(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    pub fn total_sent(&self) -> usize {
        self.categories.iter().map(|c| c.dispatch.sent()).sum()
    }

    pub fn total_pages(&self) -> u32 {
        self.categories.iter().map(|c| c.pages_fetched).sum()
    }
}
