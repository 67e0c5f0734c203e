// src/backend/models/story.rs
use crate::models::common::{ChapterIndex, PrincipalId, StoryId};
use candid::CandidType;
use serde::{Deserialize, Serialize};

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Story {
    pub id: StoryId,
    pub title: String,
    /// Index of the latest accepted chapter, 0 while the story is empty.
    pub current_chapter: ChapterIndex,
    /// Sealed by the administrator; never reset once true.
    pub is_complete: bool,
    pub owner: PrincipalId,
}

impl Story {
    pub fn new(id: StoryId, title: String, owner: PrincipalId) -> Self {
        Self {
            id,
            title,
            current_chapter: 0,
            is_complete: false,
            owner,
        }
    }

    /// Index the next accepted chapter will be stored under.
    pub fn next_chapter_index(&self) -> ChapterIndex {
        self.current_chapter + 1
    }
}
