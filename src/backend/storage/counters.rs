// src/backend/storage/counters.rs
use crate::error::StoryError;
use crate::storage::memory::Memory;
use ic_stable_structures::StableCell;

/// Monotonic id source backed by a stable cell.
///
/// The cell holds the last id handed out; 0 means nothing has been allocated
/// yet, so the first call to [`IdCounter::allocate`] returns 1.
pub struct IdCounter {
    name: &'static str,
    cell: StableCell<u64, Memory>,
}

impl IdCounter {
    pub fn init(name: &'static str, memory: Memory) -> Result<Self, StoryError> {
        let cell = StableCell::init(memory, 0).map_err(|e| {
            StoryError::StorageError(format!("Failed to initialize {} counter: {:?}", name, e))
        })?;
        Ok(Self { name, cell })
    }

    /// Last id handed out.
    pub fn current(&self) -> u64 {
        *self.cell.get()
    }

    /// Advances the counter and returns the freshly allocated id.
    pub fn allocate(&mut self) -> Result<u64, StoryError> {
        let next = self.current().checked_add(1).ok_or_else(|| {
            StoryError::InternalError(format!("{} counter overflow", self.name))
        })?;
        self.cell.set(next).map_err(|e| {
            StoryError::StorageError(format!("Failed to update {} counter: {:?}", self.name, e))
        })?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::STORY_COUNTER_MEM_ID;
    use ic_stable_structures::memory_manager::MemoryManager;
    use ic_stable_structures::DefaultMemoryImpl;

    fn fresh_counter() -> IdCounter {
        let manager = MemoryManager::init(DefaultMemoryImpl::default());
        IdCounter::init("story", manager.get(STORY_COUNTER_MEM_ID)).unwrap()
    }

    #[test]
    fn test_allocate_starts_at_one_and_increases_by_one() {
        let mut counter = fresh_counter();
        assert_eq!(counter.current(), 0);

        assert_eq!(counter.allocate(), Ok(1));
        assert_eq!(counter.allocate(), Ok(2));
        assert_eq!(counter.allocate(), Ok(3));
        assert_eq!(counter.current(), 3);
    }

    #[test]
    fn test_allocate_refuses_to_wrap() {
        let mut counter = fresh_counter();
        counter.cell.set(u64::MAX).unwrap();

        let result = counter.allocate();

        assert!(matches!(result, Err(StoryError::InternalError(_))));
        assert_eq!(counter.current(), u64::MAX);
    }
}
