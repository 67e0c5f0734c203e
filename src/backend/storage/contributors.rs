// src/backend/storage/contributors.rs
use crate::models::common::{PrincipalId, StoryId};
use crate::storage::memory::Memory;
use candid::Principal;
use ic_stable_structures::StableBTreeMap;

/// Contributor marks: Key = (StoryId, PrincipalId), presence only.
pub struct ContributorStore {
    map: StableBTreeMap<(StoryId, PrincipalId), (), Memory>,
}

impl ContributorStore {
    pub fn init(memory: Memory) -> Self {
        Self {
            map: StableBTreeMap::init(memory),
        }
    }

    /// Records the mark. Returns true if this is the principal's first chapter in the story.
    pub fn mark(&mut self, story_id: StoryId, principal: PrincipalId) -> bool {
        self.map.insert((story_id, principal), ()).is_none()
    }

    pub fn is_contributor(&self, story_id: StoryId, principal: &PrincipalId) -> bool {
        self.map.contains_key(&(story_id, *principal))
    }

    /// Every principal that authored a chapter of the story.
    pub fn list_for_story(&self, story_id: StoryId) -> Vec<PrincipalId> {
        // The empty principal sorts before any other, so the scan starts at the story's first key.
        let range_start = (story_id, Principal::management_canister());
        self.map
            .range(range_start..)
            .take_while(|((sid, _), _)| *sid == story_id)
            .map(|((_, principal), _)| principal)
            .collect()
    }
}
