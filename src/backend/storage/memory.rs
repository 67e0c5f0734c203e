// src/backend/storage/memory.rs
use ic_stable_structures::memory_manager::{MemoryId, MemoryManager, VirtualMemory};
use ic_stable_structures::DefaultMemoryImpl;
use std::cell::RefCell;

// Define Memory IDs for stable structures
// Choose non-overlapping IDs; changing them breaks upgrades
pub(crate) const STORIES_MEM_ID: MemoryId = MemoryId::new(0);
pub(crate) const CHAPTERS_MEM_ID: MemoryId = MemoryId::new(1);
pub(crate) const PLOT_DECISIONS_MEM_ID: MemoryId = MemoryId::new(2);
pub(crate) const CONTRIBUTORS_MEM_ID: MemoryId = MemoryId::new(3);
pub(crate) const STORY_COUNTER_MEM_ID: MemoryId = MemoryId::new(4);
pub(crate) const DECISION_COUNTER_MEM_ID: MemoryId = MemoryId::new(5);
pub(crate) const METRICS_MEM_ID: MemoryId = MemoryId::new(6);
// Reserve IDs 7-24 for future tables
pub(crate) const ADMIN_PRINCIPAL_MEM_ID: MemoryId = MemoryId::new(25);
pub(crate) const MIN_CYCLES_THRESHOLD_MEM_ID: MemoryId = MemoryId::new(26);

// Define memory type alias
pub type Memory = VirtualMemory<DefaultMemoryImpl>;

thread_local! {
    // Memory manager over the canister's stable memory
    static MEMORY_MANAGER: RefCell<MemoryManager<DefaultMemoryImpl>> = RefCell::new(
        MemoryManager::init(DefaultMemoryImpl::default())
    );
}

/// Runs `f` against the canister-wide memory manager.
pub fn with_memory_manager<F, R>(f: F) -> R
where
    F: FnOnce(&MemoryManager<DefaultMemoryImpl>) -> R,
{
    MEMORY_MANAGER.with(|m| f(&m.borrow()))
}
