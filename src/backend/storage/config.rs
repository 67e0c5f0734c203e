// src/backend/storage/config.rs
use crate::error::StoryError;
use crate::models::common::{Cycles, PrincipalId};
use crate::storage::memory::Memory;
use crate::storage::storable::Cbor;
use candid::Principal;
use ic_stable_structures::StableCell;

// Default values (used until init args are applied)
// The management canister never appears as a caller, so nobody is admin by default.
const DEFAULT_ADMIN_PRINCIPAL: Principal = Principal::management_canister();
const DEFAULT_MIN_CYCLES_THRESHOLD: Cycles = 10_000_000_000; // 10B cycles

/// Platform-level settings kept in stable cells.
pub struct LedgerConfig {
    admin_principal: StableCell<Cbor<PrincipalId>, Memory>,
    min_cycles_threshold: StableCell<Cycles, Memory>,
}

impl LedgerConfig {
    pub fn init(admin_memory: Memory, threshold_memory: Memory) -> Result<Self, StoryError> {
        let admin_principal = StableCell::init(admin_memory, Cbor(DEFAULT_ADMIN_PRINCIPAL))
            .map_err(|e| {
                StoryError::StorageError(format!(
                    "Failed to initialize admin principal stable cell: {:?}",
                    e
                ))
            })?;
        let min_cycles_threshold =
            StableCell::init(threshold_memory, DEFAULT_MIN_CYCLES_THRESHOLD).map_err(|e| {
                StoryError::StorageError(format!(
                    "Failed to initialize min cycles threshold stable cell: {:?}",
                    e
                ))
            })?;
        Ok(Self {
            admin_principal,
            min_cycles_threshold,
        })
    }

    /// The configured administrative principal.
    pub fn admin_principal(&self) -> PrincipalId {
        self.admin_principal.get().0
    }

    pub fn min_cycles_threshold(&self) -> Cycles {
        *self.min_cycles_threshold.get()
    }

    pub fn set_admin_principal(&mut self, admin: PrincipalId) -> Result<(), StoryError> {
        self.admin_principal
            .set(Cbor(admin))
            .map(|_old_value| ())
            .map_err(|e| StoryError::StorageError(format!("Failed to set admin principal: {:?}", e)))
    }

    pub fn set_min_cycles_threshold(&mut self, threshold: Cycles) -> Result<(), StoryError> {
        self.min_cycles_threshold
            .set(threshold)
            .map(|_old_value| ())
            .map_err(|e| {
                StoryError::StorageError(format!("Failed to set min cycles threshold: {:?}", e))
            })
    }
}
