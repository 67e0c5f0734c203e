// src/backend/models/init.rs
use candid::{CandidType, Principal};
use serde::Deserialize;

#[derive(CandidType, Deserialize, Debug, Clone)]
pub struct InitArgs {
    /// The platform administrator allowed to seal stories and close votes.
    pub admin_principal: Principal,
    pub min_cycles_threshold: u128,
}
