// src/backend/storage/metrics.rs
use crate::error::StoryError;
use crate::metrics::{LedgerMetrics, MetricEvent};
use crate::storage::memory::Memory;
use crate::storage::storable::Cbor;
use ic_stable_structures::StableCell;

type StorableLedgerMetrics = Cbor<LedgerMetrics>;

pub struct MetricsCell {
    cell: StableCell<StorableLedgerMetrics, Memory>,
}

impl MetricsCell {
    pub fn init(memory: Memory) -> Result<Self, StoryError> {
        let cell = StableCell::init(memory, Cbor(LedgerMetrics::default())).map_err(|e| {
            StoryError::StorageError(format!("Failed to initialize metrics stable cell: {:?}", e))
        })?;
        Ok(Self { cell })
    }

    pub fn get(&self) -> LedgerMetrics {
        self.cell.get().0.clone()
    }

    /// Applies `event` to the stored metrics.
    pub fn record(&mut self, event: MetricEvent) -> Result<(), StoryError> {
        let mut metrics = self.get();
        metrics.record(event);
        self.cell
            .set(Cbor(metrics))
            .map(|_old_value| ())
            .map_err(|e| StoryError::StorageError(format!("Failed to update metrics: {:?}", e)))
    }
}
