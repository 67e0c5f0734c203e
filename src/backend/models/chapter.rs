// src/backend/models/chapter.rs
use crate::models::common::{ChapterIndex, PrincipalId};
use candid::CandidType;
use serde::{Deserialize, Serialize};

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Chapter {
    pub content: String,
    pub author: PrincipalId,
}

#[derive(CandidType, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChapterEntry {
    pub index: ChapterIndex,
    pub chapter: Chapter,
}

#[derive(CandidType, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChapterPage {
    pub chapters: Vec<ChapterEntry>,
    /// Total chapters in the story, equal to its `current_chapter`.
    pub total: u64,
}
