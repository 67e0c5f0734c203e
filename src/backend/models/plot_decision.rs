// src/backend/models/plot_decision.rs
use crate::error::StoryError;
use crate::models::common::DecisionId;
use candid::CandidType;
use serde::{Deserialize, Serialize};

/// One of the two branches a plot decision offers.
#[derive(CandidType, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlotOption {
    OptionA,
    OptionB,
}

impl TryFrom<u8> for PlotOption {
    type Error = StoryError;

    /// Wire form used by clients: 0 selects option A, 1 selects option B.
    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(PlotOption::OptionA),
            1 => Ok(PlotOption::OptionB),
            other => Err(StoryError::InvalidOption(other)),
        }
    }
}

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PlotDecision {
    pub option_a: String,
    pub option_b: String,
    pub votes_a: u64,
    pub votes_b: u64,
    pub is_open: bool,
}

impl PlotDecision {
    pub fn open(option_a: String, option_b: String) -> Self {
        Self {
            option_a,
            option_b,
            votes_a: 0,
            votes_b: 0,
            is_open: true,
        }
    }

    /// Adds a single vote to the chosen tally.
    pub fn record_vote(&mut self, option: PlotOption) {
        match option {
            PlotOption::OptionA => self.votes_a = self.votes_a.saturating_add(1),
            PlotOption::OptionB => self.votes_b = self.votes_b.saturating_add(1),
        }
    }

    pub fn votes(&self) -> [u64; 2] {
        [self.votes_a, self.votes_b]
    }
}

#[derive(CandidType, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlotDecisionEntry {
    pub decision_id: DecisionId,
    pub decision: PlotDecision,
}
