//! Core traits for the curation pipeline.
//!
//! `Filter` is the synchronous, in-process rule seam. The other traits are
//! the narrow interfaces to the outside world; the `clients` crate provides
//! HTTP implementations and tests provide in-memory ones.

use async_trait::async_trait;
use catalog::{CandidateItem, CurateError, Feed, FilterRuleSet};
use std::fmt;

/// Why an item was left out. Each rule has its own variant so the verbose
/// log can say exactly which check failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Exclusion {
    ReleaseYear { year: i32, min_year: i32 },
    Language { found: String, wanted: String },
    Genre { matched: Vec<u32> },
    Keyword { keyword: String },
    RatingUnknown,
    RatingBelowThreshold { rating: f32, min_rating: f32 },
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::ReleaseYear { year, min_year } => {
                write!(f, "year {} is before {}", year, min_year)
            }
            Exclusion::Language { found, wanted } => {
                write!(f, "language '{}' is not '{}'", found, wanted)
            }
            Exclusion::Genre { matched } => write!(f, "excluded genres {:?}", matched),
            Exclusion::Keyword { keyword } => {
                write!(f, "overview mentions '{}'", keyword)
            }
            Exclusion::RatingUnknown => write!(f, "no rating available"),
            Exclusion::RatingBelowThreshold { rating, min_rating } => {
                write!(f, "rating {:.1} is below {:.1}", rating, min_rating)
            }
        }
    }
}

/// A cheap, local inclusion rule.
///
/// Filters only look at the item and the rule set, never the network, so
/// they always run before the rating lookup.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// `Ok(())` keeps the item, `Err` says why it is dropped.
    fn check(&self, item: &CandidateItem, rules: &FilterRuleSet) -> Result<(), Exclusion>;
}

/// Looks up an external quality score on a 0-10 scale.
///
/// Implementations never fail outward: transport errors, error statuses and
/// "not available" payloads all come back as `None`.
#[async_trait]
pub trait RatingResolver: Send + Sync {
    async fn resolve(&self, title: &str, year: i32) -> Option<f32>;
}

/// One page of a paginated discover endpoint. Pages are 1-indexed.
#[async_trait]
pub trait DiscoveryFeed: Send + Sync {
    async fn fetch_page(&self, feed: Feed, page: u32) -> Result<Vec<CandidateItem>, CurateError>;
}

/// Result of submitting one acquisition request.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Accepted,
    Rejected { status: Option<u16>, message: String },
    /// Dispatch disabled; nothing was sent.
    DryRun,
}

impl DispatchOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, DispatchOutcome::Accepted)
    }

    /// The refusal as an error value, for logs and reports.
    pub fn rejection(&self) -> Option<CurateError> {
        match self {
            DispatchOutcome::Rejected { status, message } => Some(CurateError::DispatchRejected {
                status: *status,
                message: message.clone(),
            }),
            _ => None,
        }
    }
}

/// Submits acquisition requests to the media manager.
#[async_trait]
pub trait RequestSink: Send + Sync {
    /// Never errors: anything other than success is a `Rejected` outcome.
    async fn submit(&self, item: &CandidateItem) -> DispatchOutcome;
}

/// Establishes the authenticated session used by every later call.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self) -> Result<(), CurateError>;
}
