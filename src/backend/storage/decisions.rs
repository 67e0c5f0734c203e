// src/backend/storage/decisions.rs
use crate::models::{
    common::{DecisionId, StoryId},
    plot_decision::{PlotDecision, PlotDecisionEntry},
};
use crate::storage::memory::Memory;
use crate::storage::storable::Cbor;
use ic_stable_structures::StableBTreeMap;

type StorablePlotDecision = Cbor<PlotDecision>;

/// Plot Decisions: Key = (StoryId, DecisionId), Value = PlotDecision
pub struct DecisionStore {
    map: StableBTreeMap<(StoryId, DecisionId), StorablePlotDecision, Memory>,
}

impl DecisionStore {
    pub fn init(memory: Memory) -> Self {
        Self {
            map: StableBTreeMap::init(memory),
        }
    }

    pub fn get(&self, story_id: StoryId, decision_id: DecisionId) -> Option<PlotDecision> {
        self.map.get(&(story_id, decision_id)).map(|cbor| cbor.0)
    }

    /// Inserts or updates a decision, returning the previous record if any.
    pub fn insert(
        &mut self,
        story_id: StoryId,
        decision_id: DecisionId,
        decision: PlotDecision,
    ) -> Option<PlotDecision> {
        self.map
            .insert((story_id, decision_id), Cbor(decision))
            .map(|prev_cbor| prev_cbor.0)
    }

    /// All decisions attached to a story, ordered by decision id.
    pub fn list_for_story(&self, story_id: StoryId) -> Vec<PlotDecisionEntry> {
        self.map
            .range((story_id, 0)..=(story_id, DecisionId::MAX))
            .map(|((_story, decision_id), decision_cbor)| PlotDecisionEntry {
                decision_id,
                decision: decision_cbor.0,
            })
            .collect()
    }
}
