//! Curation pipeline for discovered movies and shows.
//!
//! This crate provides:
//! - Filter trait and the local rule implementations
//! - InclusionFilter: local rules first, one rating lookup last
//! - PaginatedCollector: page-by-page fetch, filter, accumulate, stop
//! - RequestDispatcher: dispatch-as-you-go with an outcome ledger
//! - The service seams (`DiscoveryFeed`, `RatingResolver`, `RequestSink`,
//!   `Authenticator`) that the `clients` crate implements over HTTP
//!
//! ## Architecture
//! For each page of a discover feed:
//! 1. Filters drop items by year, language, genre, keyword
//! 2. Survivors get one rating lookup and are dropped if unknown or too low
//! 3. Accepted items are dispatched immediately, up to the target count
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{InclusionFilter, PaginatedCollector, RequestDispatcher};
//!
//! let filter = InclusionFilter::new(resolver.clone());
//! let collector = PaginatedCollector::new(feed.clone(), filter);
//! let mut dispatcher = RequestDispatcher::new(sink.clone());
//!
//! let movies = collector
//!     .collect(MediaType::Movie, 10, 300, &rules, &mut dispatcher)
//!     .await;
//! ```

pub mod collector;
pub mod dispatcher;
pub mod filter_pipeline;
pub mod filters;
pub mod traits;

// Re-export main types
pub use collector::{Collected, PaginatedCollector, StopReason};
pub use dispatcher::{DispatchCounts, DispatchRecord, RequestDispatcher};
pub use filter_pipeline::{FilterPipeline, InclusionFilter};
pub use traits::{
    Authenticator, DiscoveryFeed, DispatchOutcome, Exclusion, Filter, RatingResolver, RequestSink,
};
