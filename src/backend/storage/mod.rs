// src/backend/storage/mod.rs
// Stable memory layout and the ledger aggregate built on top of it

pub mod chapters;
pub mod config;
pub mod contributors;
pub mod counters;
pub mod decisions;
pub mod memory;
pub mod metrics;
pub mod storable;
pub mod stories;

use crate::error::StoryError;
use crate::metrics::MetricEvent;
use ic_stable_structures::memory_manager::MemoryManager;
use ic_stable_structures::DefaultMemoryImpl;
use std::cell::RefCell;

pub use chapters::ChapterStore;
pub use config::LedgerConfig;
pub use contributors::ContributorStore;
pub use counters::IdCounter;
pub use decisions::DecisionStore;
pub use memory::{with_memory_manager, Memory};
pub use metrics::MetricsCell;
pub use storable::Cbor;
pub use stories::StoryStore;

/// All state owned by the story ledger: the four tables, both id counters,
/// configuration and metrics.
///
/// Operations take `&mut StoryLedger` and run to completion, so each one is a
/// single read-modify-write over this aggregate.
pub struct StoryLedger {
    pub stories: StoryStore,
    pub chapters: ChapterStore,
    pub decisions: DecisionStore,
    pub contributors: ContributorStore,
    pub story_ids: IdCounter,
    pub decision_ids: IdCounter,
    pub config: LedgerConfig,
    pub metrics: MetricsCell,
}

impl StoryLedger {
    /// Lays the ledger's structures onto the memories handed out by `manager`.
    /// Existing contents are picked up as-is, which is what keeps state across upgrades.
    pub fn init(manager: &MemoryManager<DefaultMemoryImpl>) -> Result<Self, StoryError> {
        Ok(Self {
            stories: StoryStore::init(manager.get(memory::STORIES_MEM_ID)),
            chapters: ChapterStore::init(manager.get(memory::CHAPTERS_MEM_ID)),
            decisions: DecisionStore::init(manager.get(memory::PLOT_DECISIONS_MEM_ID)),
            contributors: ContributorStore::init(manager.get(memory::CONTRIBUTORS_MEM_ID)),
            story_ids: IdCounter::init("story", manager.get(memory::STORY_COUNTER_MEM_ID))?,
            decision_ids: IdCounter::init(
                "decision",
                manager.get(memory::DECISION_COUNTER_MEM_ID),
            )?,
            config: LedgerConfig::init(
                manager.get(memory::ADMIN_PRINCIPAL_MEM_ID),
                manager.get(memory::MIN_CYCLES_THRESHOLD_MEM_ID),
            )?,
            metrics: MetricsCell::init(manager.get(memory::METRICS_MEM_ID))?,
        })
    }

    /// Bumps a metric after a transition has been applied.
    /// Metrics are advisory, so a write failure is logged and swallowed.
    pub(crate) fn record_metric(&mut self, event: MetricEvent) {
        if let Err(e) = self.metrics.record(event) {
            tracing::warn!(?event, error = %e, "metrics update failed");
        }
    }
}

thread_local! {
    /// The canister's single ledger instance.
    static LEDGER: RefCell<StoryLedger> = RefCell::new(
        with_memory_manager(StoryLedger::init)
            .expect("Failed to initialize story ledger in stable memory")
    );
}

/// Runs a read-only closure against the canister ledger.
pub fn with_ledger<F, R>(f: F) -> R
where
    F: FnOnce(&StoryLedger) -> R,
{
    LEDGER.with(|ledger| f(&ledger.borrow()))
}

/// Runs a mutating closure against the canister ledger.
pub fn with_ledger_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut StoryLedger) -> R,
{
    LEDGER.with(|ledger| f(&mut ledger.borrow_mut()))
}
