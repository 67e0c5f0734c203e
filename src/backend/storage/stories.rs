// src/backend/storage/stories.rs
use crate::models::{common::StoryId, story::Story};
use crate::storage::memory::Memory;
use crate::storage::storable::Cbor;
use ic_stable_structures::StableBTreeMap;

type StorableStory = Cbor<Story>;

/// Stories: Key = StoryId, Value = Story
pub struct StoryStore {
    map: StableBTreeMap<StoryId, StorableStory, Memory>,
}

impl StoryStore {
    pub fn init(memory: Memory) -> Self {
        Self {
            map: StableBTreeMap::init(memory),
        }
    }

    pub fn get(&self, story_id: StoryId) -> Option<Story> {
        self.map.get(&story_id).map(|cbor| cbor.0)
    }

    /// Inserts or replaces a story, returning the previous record if any.
    pub fn insert(&mut self, story: Story) -> Option<Story> {
        self.map
            .insert(story.id, Cbor(story))
            .map(|prev_cbor| prev_cbor.0)
    }

    pub fn len(&self) -> u64 {
        self.map.len()
    }
}
