// src/backend/storage/chapters.rs
use crate::models::{
    chapter::{Chapter, ChapterEntry},
    common::{ChapterIndex, StoryId},
};
use crate::storage::memory::Memory;
use crate::storage::storable::Cbor;
use ic_stable_structures::StableBTreeMap;

type StorableChapter = Cbor<Chapter>;

/// Chapters: Key = (StoryId, ChapterIndex), Value = Chapter
///
/// Keys order by story first, so one story's chapters are a contiguous range
/// sorted by index.
pub struct ChapterStore {
    map: StableBTreeMap<(StoryId, ChapterIndex), StorableChapter, Memory>,
}

impl ChapterStore {
    pub fn init(memory: Memory) -> Self {
        Self {
            map: StableBTreeMap::init(memory),
        }
    }

    pub fn get(&self, story_id: StoryId, index: ChapterIndex) -> Option<Chapter> {
        self.map.get(&(story_id, index)).map(|cbor| cbor.0)
    }

    /// Stores a chapter. Returns false without writing if the slot is taken.
    pub fn insert_new(&mut self, story_id: StoryId, index: ChapterIndex, chapter: Chapter) -> bool {
        let key = (story_id, index);
        if self.map.contains_key(&key) {
            return false;
        }
        self.map.insert(key, Cbor(chapter));
        true
    }

    /// Chapters of one story in index order, skipping `offset` and yielding at most `limit`.
    pub fn list_for_story(&self, story_id: StoryId, offset: u64, limit: usize) -> Vec<ChapterEntry> {
        let start = offset.saturating_add(1);
        self.map
            .range((story_id, start)..=(story_id, ChapterIndex::MAX))
            .take(limit)
            .map(|((_story, index), chapter_cbor)| ChapterEntry {
                index,
                chapter: chapter_cbor.0,
            })
            .collect()
    }

    /// Number of chapters stored for one story.
    pub fn count_for_story(&self, story_id: StoryId) -> u64 {
        self.map
            .range((story_id, 0)..=(story_id, ChapterIndex::MAX))
            .count() as u64
    }
}
