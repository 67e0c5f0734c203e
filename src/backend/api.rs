// src/backend/api.rs
// Candid endpoints. Every call reads the authenticated caller from the IC and
// runs one ledger operation to completion.

use crate::{
    error::StoryError,
    metrics::GetMetricsResponse,
    models::{
        chapter::{Chapter, ChapterPage},
        common::{ChapterIndex, DecisionId, PrincipalId, StoryId},
        plot_decision::{PlotDecision, PlotDecisionEntry},
        story::Story,
    },
    services::{plot_service, story_service},
    storage::{with_ledger, with_ledger_mut},
    utils::guards::{check_admin, check_cycles},
};
use candid::{CandidType, Deserialize};
use ic_cdk::api::canister_balance128;
use ic_cdk::caller;
use ic_cdk_macros::{query, update};
use validator::Validate;

const DEFAULT_PAGE_LIMIT: u32 = 20;

// --- Validation Helper ---
fn validate_request<T: Validate>(req: &T) -> Result<(), StoryError> {
    req.validate()
        .map_err(|e| StoryError::InvalidInput(e.to_string()))
}

/// Rejects update calls while the canister is below its cycle threshold.
fn ensure_cycles() -> Result<(), StoryError> {
    let threshold = with_ledger(|ledger| ledger.config.min_cycles_threshold());
    let balance = canister_balance128();
    check_cycles(balance, threshold).inspect_err(|_| {
        ic_cdk::println!(
            "Cycle balance low: {} cycles, threshold: {}",
            balance,
            threshold
        );
    })
}

// --- Request Structs ---

#[derive(CandidType, Deserialize, Clone, Debug, Validate)]
pub struct CreateStoryRequest {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
}

#[derive(CandidType, Deserialize, Clone, Debug, Validate)]
pub struct AddChapterRequest {
    pub story_id: StoryId,
    #[validate(length(min = 1, max = 65536))]
    pub content: String,
}

#[derive(CandidType, Deserialize, Clone, Debug, Validate)]
pub struct CreatePlotDecisionRequest {
    pub story_id: StoryId,
    #[validate(length(min = 1, max = 512))]
    pub option_a: String,
    #[validate(length(min = 1, max = 512))]
    pub option_b: String,
}

#[derive(CandidType, Deserialize, Clone, Debug)]
pub struct VoteOnPlotRequest {
    pub story_id: StoryId,
    pub decision_id: DecisionId,
    /// 0 votes for option A, 1 for option B.
    pub option: u8,
}

#[derive(CandidType, Deserialize, Clone, Debug)]
pub struct CloseVotingRequest {
    pub story_id: StoryId,
    pub decision_id: DecisionId,
}

#[derive(CandidType, Deserialize, Clone, Debug, Validate)]
pub struct ListChaptersRequest {
    pub story_id: StoryId,
    pub offset: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

// --- Story Endpoints ---

#[update]
fn create_story(req: CreateStoryRequest) -> Result<StoryId, StoryError> {
    validate_request(&req)?;
    ensure_cycles()?;
    let caller = caller();
    with_ledger_mut(|ledger| story_service::create_story(ledger, caller, req.title))
}

#[update]
fn add_chapter(req: AddChapterRequest) -> Result<ChapterIndex, StoryError> {
    validate_request(&req)?;
    ensure_cycles()?;
    let caller = caller();
    with_ledger_mut(|ledger| story_service::add_chapter(ledger, caller, req.story_id, req.content))
}

#[update]
fn complete_story(story_id: StoryId) -> Result<(), StoryError> {
    ensure_cycles()?;
    let caller = caller();
    with_ledger_mut(|ledger| story_service::complete_story(ledger, caller, story_id))
}

#[query]
fn get_story(story_id: StoryId) -> Result<Story, StoryError> {
    with_ledger(|ledger| story_service::get_story(ledger, story_id))
}

#[query]
fn get_story_owner(story_id: StoryId) -> Result<PrincipalId, StoryError> {
    with_ledger(|ledger| story_service::get_story_owner(ledger, story_id))
}

#[query]
fn get_story_count() -> u64 {
    with_ledger(story_service::story_count)
}

#[query]
fn get_chapter(story_id: StoryId, index: ChapterIndex) -> Result<Chapter, StoryError> {
    with_ledger(|ledger| story_service::get_chapter(ledger, story_id, index))
}

#[query]
fn list_chapters(req: ListChaptersRequest) -> Result<ChapterPage, StoryError> {
    validate_request(&req)?;
    let offset = req.offset.unwrap_or(0);
    let limit = req.limit.unwrap_or(DEFAULT_PAGE_LIMIT) as usize;
    with_ledger(|ledger| story_service::list_chapters(ledger, req.story_id, offset, limit))
}

#[query]
fn is_contributor(story_id: StoryId, principal: PrincipalId) -> bool {
    with_ledger(|ledger| story_service::is_contributor(ledger, story_id, &principal))
}

#[query]
fn list_contributors(story_id: StoryId) -> Result<Vec<PrincipalId>, StoryError> {
    with_ledger(|ledger| story_service::list_contributors(ledger, story_id))
}

// --- Plot Decision Endpoints ---

#[update]
fn create_plot_decision(req: CreatePlotDecisionRequest) -> Result<DecisionId, StoryError> {
    validate_request(&req)?;
    ensure_cycles()?;
    let caller = caller();
    with_ledger_mut(|ledger| {
        plot_service::create_plot_decision(ledger, caller, req.story_id, req.option_a, req.option_b)
    })
}

#[update]
fn vote_on_plot(req: VoteOnPlotRequest) -> Result<(), StoryError> {
    ensure_cycles()?;
    let caller = caller();
    with_ledger_mut(|ledger| {
        plot_service::vote_on_plot_index(ledger, caller, req.story_id, req.decision_id, req.option)
    })
}

#[update]
fn close_voting(req: CloseVotingRequest) -> Result<(), StoryError> {
    ensure_cycles()?;
    let caller = caller();
    with_ledger_mut(|ledger| {
        plot_service::close_voting(ledger, caller, req.story_id, req.decision_id)
    })
}

#[query]
fn get_plot_decision(story_id: StoryId, decision_id: DecisionId) -> Result<PlotDecision, StoryError> {
    with_ledger(|ledger| plot_service::get_plot_decision(ledger, story_id, decision_id))
}

#[query]
fn list_plot_decisions(story_id: StoryId) -> Result<Vec<PlotDecisionEntry>, StoryError> {
    with_ledger(|ledger| plot_service::list_plot_decisions(ledger, story_id))
}

// --- Admin & Metrics Endpoints ---

#[query]
fn get_admin() -> PrincipalId {
    with_ledger(|ledger| ledger.config.admin_principal())
}

#[query]
fn get_metrics() -> Result<GetMetricsResponse, StoryError> {
    let caller = caller();
    with_ledger(|ledger| {
        check_admin(ledger.config.admin_principal(), caller)?;
        Ok(GetMetricsResponse {
            metrics: ledger.metrics.get(),
            cycle_balance: canister_balance128(),
        })
    })
}
