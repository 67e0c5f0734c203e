// src/backend/services/plot_service.rs
// Plot decisions: a two-option vote per decision point, Open -> Closed

use crate::{
    error::StoryError,
    metrics::MetricEvent,
    models::{
        common::{DecisionId, PrincipalId, StoryId},
        plot_decision::{PlotDecision, PlotDecisionEntry, PlotOption},
    },
    services::story_service::{get_story, load_open_story},
    storage::StoryLedger,
    utils::guards::check_admin,
};
use tracing::{debug, info};

/// Opens a new plot decision on a story that still accepts content.
///
/// Decision ids come from one counter shared by every story, so ids within a
/// single story are increasing but not contiguous.
///
/// # Errors
/// * `NotFound` if the story does not exist.
/// * `StoryComplete` if the story has been sealed.
pub fn create_plot_decision(
    ledger: &mut StoryLedger,
    caller: PrincipalId,
    story_id: StoryId,
    option_a: String,
    option_b: String,
) -> Result<DecisionId, StoryError> {
    load_open_story(ledger, story_id)?;

    let decision_id = ledger.decision_ids.allocate()?;
    ledger
        .decisions
        .insert(story_id, decision_id, PlotDecision::open(option_a, option_b));
    ledger.record_metric(MetricEvent::DecisionCreated);

    info!(story_id, decision_id, opened_by = %caller, "plot decision opened");
    Ok(decision_id)
}

/// Adds one vote for `option`. The same caller may vote any number of times.
///
/// # Errors
/// * `NotFound` if the decision does not exist under this story.
/// * `DecisionClosed` if voting has been closed.
pub fn vote_on_plot(
    ledger: &mut StoryLedger,
    caller: PrincipalId,
    story_id: StoryId,
    decision_id: DecisionId,
    option: PlotOption,
) -> Result<(), StoryError> {
    let decision = load_open_decision(ledger, story_id, decision_id)?;
    apply_vote(ledger, caller, story_id, decision_id, decision, option);
    Ok(())
}

/// Index form of [`vote_on_plot`] as sent by clients (0 = option A, 1 = option B).
///
/// The decision is checked before the index, so errors come back in the
/// order `NotFound`, `DecisionClosed`, `InvalidOption`.
pub fn vote_on_plot_index(
    ledger: &mut StoryLedger,
    caller: PrincipalId,
    story_id: StoryId,
    decision_id: DecisionId,
    index: u8,
) -> Result<(), StoryError> {
    let decision = load_open_decision(ledger, story_id, decision_id)?;
    let option = PlotOption::try_from(index).inspect_err(|_| {
        debug!(story_id, decision_id, index, "rejected: invalid plot option");
    })?;
    apply_vote(ledger, caller, story_id, decision_id, decision, option);
    Ok(())
}

fn apply_vote(
    ledger: &mut StoryLedger,
    caller: PrincipalId,
    story_id: StoryId,
    decision_id: DecisionId,
    mut decision: PlotDecision,
    option: PlotOption,
) {
    decision.record_vote(option);
    let [votes_a, votes_b] = decision.votes();
    ledger.decisions.insert(story_id, decision_id, decision);
    ledger.record_metric(MetricEvent::VoteCast);

    info!(story_id, decision_id, voter = %caller, ?option, votes_a, votes_b, "vote recorded");
}

/// Closes voting on a decision. Tallies are frozen from here on.
///
/// Only the platform administrator may close voting. Closing is allowed even
/// when the story has since been completed, and closing twice changes nothing.
///
/// # Errors
/// * `Unauthorized` if `caller` is not the administrator (checked first).
/// * `NotFound` if the decision does not exist under this story.
pub fn close_voting(
    ledger: &mut StoryLedger,
    caller: PrincipalId,
    story_id: StoryId,
    decision_id: DecisionId,
) -> Result<(), StoryError> {
    check_admin(ledger.config.admin_principal(), caller)?;
    let mut decision = get_plot_decision(ledger, story_id, decision_id)?;

    if !decision.is_open {
        debug!(story_id, decision_id, "voting already closed");
        return Ok(());
    }
    decision.is_open = false;
    let [votes_a, votes_b] = decision.votes();
    ledger.decisions.insert(story_id, decision_id, decision);
    ledger.record_metric(MetricEvent::DecisionClosed);

    info!(story_id, decision_id, votes_a, votes_b, "voting closed");
    Ok(())
}

fn load_open_decision(
    ledger: &StoryLedger,
    story_id: StoryId,
    decision_id: DecisionId,
) -> Result<PlotDecision, StoryError> {
    let decision = get_plot_decision(ledger, story_id, decision_id)?;
    if !decision.is_open {
        debug!(story_id, decision_id, "rejected: voting closed");
        return Err(StoryError::DecisionClosed(decision_id));
    }
    Ok(decision)
}

pub fn get_plot_decision(
    ledger: &StoryLedger,
    story_id: StoryId,
    decision_id: DecisionId,
) -> Result<PlotDecision, StoryError> {
    ledger
        .decisions
        .get(story_id, decision_id)
        .ok_or_else(|| StoryError::decision_not_found(story_id, decision_id))
}

pub fn list_plot_decisions(
    ledger: &StoryLedger,
    story_id: StoryId,
) -> Result<Vec<PlotDecisionEntry>, StoryError> {
    get_story(ledger, story_id)?;
    Ok(ledger.decisions.list_for_story(story_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::story_service::{add_chapter, complete_story, create_story, get_story};
    use crate::storage::test_support::{admin, ledger, principal};

    fn ledger_with_decision() -> (StoryLedger, StoryId, DecisionId) {
        let mut ledger = ledger();
        let story_id =
            create_story(&mut ledger, principal(1), "The Great Adventure".to_string()).unwrap();
        let decision_id = create_plot_decision(
            &mut ledger,
            principal(1),
            story_id,
            "Go left".to_string(),
            "Go right".to_string(),
        )
        .unwrap();
        (ledger, story_id, decision_id)
    }

    #[test]
    fn test_create_plot_decision_opens_with_zero_tallies() {
        let (ledger, story_id, decision_id) = ledger_with_decision();

        assert_eq!(decision_id, 1);
        assert_eq!(
            get_plot_decision(&ledger, story_id, decision_id),
            Ok(PlotDecision {
                option_a: "Go left".to_string(),
                option_b: "Go right".to_string(),
                votes_a: 0,
                votes_b: 0,
                is_open: true,
            })
        );
    }

    #[test]
    fn test_decision_ids_are_global_across_stories() {
        // Arrange
        let (mut ledger, first_story, first_decision) = ledger_with_decision();
        let second_story = create_story(&mut ledger, principal(2), "Sequel".to_string()).unwrap();

        // Act
        let second_decision = create_plot_decision(
            &mut ledger,
            principal(2),
            second_story,
            "Fight".to_string(),
            "Flee".to_string(),
        )
        .unwrap();
        let third_decision = create_plot_decision(
            &mut ledger,
            principal(3),
            first_story,
            "Stay".to_string(),
            "Go".to_string(),
        )
        .unwrap();

        // Assert
        assert_eq!((first_decision, second_decision, third_decision), (1, 2, 3));
        let ids: Vec<DecisionId> = list_plot_decisions(&ledger, first_story)
            .unwrap()
            .iter()
            .map(|entry| entry.decision_id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(list_plot_decisions(&ledger, second_story).unwrap().len(), 1);
        // Decisions are keyed by story, so the id alone does not resolve elsewhere.
        assert!(matches!(
            get_plot_decision(&ledger, second_story, first_decision),
            Err(StoryError::NotFound(_))
        ));
    }

    #[test]
    fn test_create_plot_decision_on_missing_or_complete_story_fails_cleanly() {
        // Arrange
        let mut ledger = ledger();
        let story_id = create_story(&mut ledger, principal(1), "Adventure".to_string()).unwrap();
        complete_story(&mut ledger, admin(), story_id).unwrap();

        // Act
        let missing = create_plot_decision(
            &mut ledger,
            principal(1),
            99,
            "a".to_string(),
            "b".to_string(),
        );
        let sealed = create_plot_decision(
            &mut ledger,
            principal(1),
            story_id,
            "a".to_string(),
            "b".to_string(),
        );

        // Assert
        assert!(matches!(missing, Err(StoryError::NotFound(_))));
        assert_eq!(sealed, Err(StoryError::StoryComplete(story_id)));
        assert_eq!(ledger.decision_ids.current(), 0);
        assert!(list_plot_decisions(&ledger, story_id).unwrap().is_empty());
        assert!(matches!(
            list_plot_decisions(&ledger, 99),
            Err(StoryError::NotFound(_))
        ));
    }

    #[test]
    fn test_votes_accumulate_including_repeat_votes_from_one_caller() {
        // Arrange
        let (mut ledger, story_id, decision_id) = ledger_with_decision();
        let voter = principal(7);

        // Act
        vote_on_plot(&mut ledger, voter, story_id, decision_id, PlotOption::OptionA).unwrap();
        vote_on_plot(&mut ledger, voter, story_id, decision_id, PlotOption::OptionB).unwrap();
        vote_on_plot(&mut ledger, voter, story_id, decision_id, PlotOption::OptionA).unwrap();

        // Assert
        let decision = get_plot_decision(&ledger, story_id, decision_id).unwrap();
        assert_eq!(decision.votes(), [2, 1]);
        assert_eq!(ledger.metrics.get().total_votes, 3);
    }

    #[test]
    fn test_vote_by_index_rejects_out_of_range_option() {
        // Arrange
        let (mut ledger, story_id, decision_id) = ledger_with_decision();
        vote_on_plot_index(&mut ledger, principal(2), story_id, decision_id, 0).unwrap();
        vote_on_plot_index(&mut ledger, principal(2), story_id, decision_id, 1).unwrap();

        // Act
        let result = vote_on_plot_index(&mut ledger, principal(2), story_id, decision_id, 2);

        // Assert
        assert_eq!(result, Err(StoryError::InvalidOption(2)));
        let decision = get_plot_decision(&ledger, story_id, decision_id).unwrap();
        assert_eq!(decision.votes(), [1, 1]);
        assert_eq!(ledger.metrics.get().total_votes, 2);
    }

    #[test]
    fn test_vote_errors_follow_decision_then_state_then_option() {
        let (mut ledger, story_id, decision_id) = ledger_with_decision();

        let missing = vote_on_plot_index(&mut ledger, principal(2), story_id, 42, 9);
        assert!(matches!(missing, Err(StoryError::NotFound(_))));

        close_voting(&mut ledger, admin(), story_id, decision_id).unwrap();
        let closed = vote_on_plot_index(&mut ledger, principal(2), story_id, decision_id, 9);
        assert_eq!(closed, Err(StoryError::DecisionClosed(decision_id)));
    }

    #[test]
    fn test_closed_decision_rejects_votes_and_freezes_tallies() {
        // Arrange
        let (mut ledger, story_id, decision_id) = ledger_with_decision();
        vote_on_plot(&mut ledger, principal(2), story_id, decision_id, PlotOption::OptionB).unwrap();

        // Act
        close_voting(&mut ledger, admin(), story_id, decision_id).unwrap();
        let result = vote_on_plot(
            &mut ledger,
            principal(3),
            story_id,
            decision_id,
            PlotOption::OptionA,
        );

        // Assert
        assert_eq!(result, Err(StoryError::DecisionClosed(decision_id)));
        let decision = get_plot_decision(&ledger, story_id, decision_id).unwrap();
        assert!(!decision.is_open);
        assert_eq!(decision.votes(), [0, 1]);
    }

    #[test]
    fn test_close_voting_requires_admin_and_mutates_nothing_otherwise() {
        let (mut ledger, story_id, decision_id) = ledger_with_decision();

        let result = close_voting(&mut ledger, principal(1), story_id, decision_id);

        assert!(matches!(result, Err(StoryError::Unauthorized(_))));
        assert!(get_plot_decision(&ledger, story_id, decision_id).unwrap().is_open);
        assert_eq!(ledger.metrics.get().closed_decisions, 0);
    }

    #[test]
    fn test_close_voting_on_missing_decision_is_not_found() {
        let (mut ledger, story_id, _) = ledger_with_decision();

        let result = close_voting(&mut ledger, admin(), story_id, 5);

        assert!(matches!(result, Err(StoryError::NotFound(_))));
    }

    #[test]
    fn test_close_voting_allowed_after_story_completion_and_idempotent() {
        // Arrange
        let (mut ledger, story_id, decision_id) = ledger_with_decision();
        complete_story(&mut ledger, admin(), story_id).unwrap();

        // Act
        let first = close_voting(&mut ledger, admin(), story_id, decision_id);
        let second = close_voting(&mut ledger, admin(), story_id, decision_id);

        // Assert
        assert_eq!(first, Ok(()));
        assert_eq!(second, Ok(()));
        assert!(!get_plot_decision(&ledger, story_id, decision_id).unwrap().is_open);
        assert_eq!(ledger.metrics.get().closed_decisions, 1);
    }

    #[test]
    fn test_voting_still_open_after_story_completion() {
        let (mut ledger, story_id, decision_id) = ledger_with_decision();
        complete_story(&mut ledger, admin(), story_id).unwrap();

        vote_on_plot(&mut ledger, principal(4), story_id, decision_id, PlotOption::OptionA).unwrap();

        assert_eq!(
            get_plot_decision(&ledger, story_id, decision_id).unwrap().votes(),
            [1, 0]
        );
    }

    #[test]
    fn test_end_to_end_story_session() {
        let mut ledger = ledger();
        let (u1, u2, u3) = (principal(1), principal(2), principal(3));

        let story_id = create_story(&mut ledger, u1, "Adventure".to_string()).unwrap();
        assert_eq!(story_id, 1);
        let story = get_story(&ledger, story_id).unwrap();
        assert_eq!(story.title, "Adventure");
        assert_eq!(story.current_chapter, 0);

        let chapter = add_chapter(&mut ledger, u2, story_id, "dark night".to_string()).unwrap();
        assert_eq!(chapter, 1);
        assert!(ledger.contributors.is_contributor(story_id, &u2));

        let decision_id = create_plot_decision(
            &mut ledger,
            u1,
            story_id,
            "left".to_string(),
            "right".to_string(),
        )
        .unwrap();
        assert_eq!(decision_id, 1);
        let decision = get_plot_decision(&ledger, story_id, decision_id).unwrap();
        assert_eq!(decision.votes(), [0, 0]);
        assert!(decision.is_open);

        vote_on_plot_index(&mut ledger, u1, story_id, decision_id, 0).unwrap();
        vote_on_plot_index(&mut ledger, u1, story_id, decision_id, 0).unwrap();
        vote_on_plot_index(&mut ledger, u1, story_id, decision_id, 1).unwrap();
        assert_eq!(
            get_plot_decision(&ledger, story_id, decision_id).unwrap().votes(),
            [2, 1]
        );

        close_voting(&mut ledger, admin(), story_id, decision_id).unwrap();
        assert!(!get_plot_decision(&ledger, story_id, decision_id).unwrap().is_open);

        complete_story(&mut ledger, admin(), story_id).unwrap();
        assert!(get_story(&ledger, story_id).unwrap().is_complete);

        assert_eq!(
            add_chapter(&mut ledger, u3, story_id, "epilogue".to_string()),
            Err(StoryError::StoryComplete(story_id))
        );

        let metrics = ledger.metrics.get();
        assert_eq!(metrics.total_stories, 1);
        assert_eq!(metrics.completed_stories, 1);
        assert_eq!(metrics.total_chapters, 1);
        assert_eq!(metrics.total_decisions, 1);
        assert_eq!(metrics.closed_decisions, 1);
        assert_eq!(metrics.total_votes, 3);
    }
}
