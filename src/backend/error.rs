// src/backend/error.rs
use crate::models::common::{DecisionId, StoryId};
use candid::CandidType;
use serde::Deserialize;
use thiserror::Error;

#[derive(CandidType, Deserialize, Error, Debug, Clone, PartialEq, Eq)]
pub enum StoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Story {0} is complete")]
    StoryComplete(StoryId),

    #[error("Plot decision {0} is closed")]
    DecisionClosed(DecisionId),

    #[error("Invalid plot option: {0}")]
    InvalidOption(u8),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    // Host-boundary failures, never produced by a valid state transition
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal canister error: {0}")]
    InternalError(String),

    #[error("Canister cycle balance too low for operation")]
    CycleLow,
}

impl StoryError {
    pub(crate) fn story_not_found(story_id: StoryId) -> Self {
        StoryError::NotFound(format!("story {}", story_id))
    }

    pub(crate) fn decision_not_found(story_id: StoryId, decision_id: DecisionId) -> Self {
        StoryError::NotFound(format!(
            "plot decision {} of story {}",
            decision_id, story_id
        ))
    }
}
