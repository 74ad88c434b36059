//! # Catalog Crate
//!
//! Domain types for the curator: what a discovered movie or show looks like
//! once normalized, the rules it is judged by, and the errors the rest of the
//! workspace reports.
//!
//! ## Main Components
//!
//! - **types**: `MediaType`, `Feed`, `CandidateItem`, and the raw wire types
//! - **parser**: normalize discover JSON, parse release years
//! - **rules**: `FilterRuleSet`
//! - **error**: `CurateError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{parse_discover_page, Feed, FilterRuleSet, MediaType};
//!
//! let items = parse_discover_page(&body, Feed::Category(MediaType::Movie), 1)?;
//! let rules = FilterRuleSet::default();
//! for item in &items {
//!     if rules.matching_keyword(&item.overview).is_some() {
//!         println!("skip {}", item);
//!     }
//! }
//! ```

pub mod error;
pub mod parser;
pub mod rules;
pub mod types;

pub use error::{CurateError, Result};
pub use parser::{parse_discover_page, parse_release_year};
pub use rules::FilterRuleSet;
pub use types::{
    CandidateItem, DiscoverPage, Feed, MediaId, MediaType, RawDiscoverItem, UNKNOWN_YEAR,
};
