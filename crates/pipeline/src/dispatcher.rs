//! Request dispatch with an outcome ledger.
//!
//! The collector hands every accepted item here the moment it is accepted.
//! Outcomes are only recorded; a rejection never removes the item from the
//! accepted list or triggers a re-fetch.

use crate::traits::{DispatchOutcome, RequestSink};
use catalog::{CandidateItem, MediaId, MediaType};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One dispatch attempt, in dispatch order.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRecord {
    pub media_type: MediaType,
    pub id: MediaId,
    pub title: String,
    pub outcome: DispatchOutcome,
}

/// Per-category totals derived from the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchCounts {
    pub accepted: usize,
    pub rejected: usize,
    pub skipped: usize,
}

impl DispatchCounts {
    /// Requests that actually went out.
    pub fn sent(&self) -> usize {
        self.accepted + self.rejected
    }
}

/// Submits acquisition requests and records the outcome of each.
pub struct RequestDispatcher {
    sink: Arc<dyn RequestSink>,
    enabled: bool,
    delay: Duration,
    records: Vec<DispatchRecord>,
}

impl RequestDispatcher {
    /// Live dispatcher: every item is submitted to `sink`.
    pub fn new(sink: Arc<dyn RequestSink>) -> Self {
        Self {
            sink,
            enabled: true,
            delay: Duration::ZERO,
            records: Vec::new(),
        }
    }

    /// Dry run when `enabled` is false: outcomes are recorded as `DryRun`
    /// and the sink is never called.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Fixed pause after each live submission.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Submit one item and record the outcome.
    pub async fn dispatch(&mut self, item: &CandidateItem) -> DispatchOutcome {
        let outcome = if self.enabled {
            let outcome = self.sink.submit(item).await;
            if let Some(err) = outcome.rejection() {
                warn!("Failed to request {}: {}", item.title, err);
            } else {
                info!("Requested: {}", item.title);
            }
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            outcome
        } else {
            debug!("Dry run, not requesting {}", item.title);
            DispatchOutcome::DryRun
        };

        self.records.push(DispatchRecord {
            media_type: item.media_type,
            id: item.id,
            title: item.title.clone(),
            outcome: outcome.clone(),
        });
        outcome
    }

    /// Every attempt so far, oldest first.
    pub fn records(&self) -> &[DispatchRecord] {
        &self.records
    }

    pub fn counts_for(&self, media_type: MediaType) -> DispatchCounts {
        self.records
            .iter()
            .filter(|r| r.media_type == media_type)
            .fold(DispatchCounts::default(), |mut counts, record| {
                match record.outcome {
                    DispatchOutcome::Accepted => counts.accepted += 1,
                    DispatchOutcome::Rejected { .. } => counts.rejected += 1,
                    DispatchOutcome::DryRun => counts.skipped += 1,
                }
                counts
            })
    }
}
