// src/backend/metrics.rs
use candid::{CandidType, Deserialize};
use serde::Serialize;

/// Running totals over the ledger, bumped after each accepted transition.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerMetrics {
    pub total_stories: u64,
    pub completed_stories: u64,
    pub total_chapters: u64,
    pub total_decisions: u64,
    pub closed_decisions: u64,
    pub total_votes: u64,
}

/// A ledger transition that moves one of the counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricEvent {
    StoryCreated,
    StoryCompleted,
    ChapterAdded,
    DecisionCreated,
    DecisionClosed,
    VoteCast,
}

impl LedgerMetrics {
    pub fn record(&mut self, event: MetricEvent) {
        let counter = match event {
            MetricEvent::StoryCreated => &mut self.total_stories,
            MetricEvent::StoryCompleted => &mut self.completed_stories,
            MetricEvent::ChapterAdded => &mut self.total_chapters,
            MetricEvent::DecisionCreated => &mut self.total_decisions,
            MetricEvent::DecisionClosed => &mut self.closed_decisions,
            MetricEvent::VoteCast => &mut self.total_votes,
        };
        *counter = counter.saturating_add(1);
    }
}

// Response type for get_metrics, including the live cycle balance
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, Default)]
pub struct GetMetricsResponse {
    pub metrics: LedgerMetrics,
    pub cycle_balance: u128,
}
