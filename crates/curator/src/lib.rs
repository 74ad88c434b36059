//! Curation session for the reel-curate pipeline.
//!
//! This crate owns one run end to end: log in once, collect each configured
//! category in order, dispatch requests as items are accepted, and summarize
//! the outcome in a `RunReport`.

pub mod config;
pub mod orchestrator;
pub mod report;

pub use config::{CurateConfig, FeedMode};
pub use orchestrator::{RunState, Services, SessionOrchestrator};
pub use report::{CategoryReport, RunReport};
