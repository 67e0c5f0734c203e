// src/backend/models/common.rs
use candid::Principal;

// Sequential ids handed out by the ledger counters
pub type StoryId = u64; // Starts at 1, shared counter across all callers
pub type ChapterIndex = u64; // 1-based, dense within a story
pub type DecisionId = u64; // Starts at 1, global across all stories

pub type PrincipalId = Principal; // Authenticated caller or stored author/owner

pub type Cycles = u128;
