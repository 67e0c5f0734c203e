// src/backend/services/story_service.rs
// Story lifecycle: creation, chapter append, sealing, and the read side of those tables

use crate::{
    error::StoryError,
    metrics::MetricEvent,
    models::{
        chapter::{Chapter, ChapterPage},
        common::{ChapterIndex, PrincipalId, StoryId},
        story::Story,
    },
    storage::StoryLedger,
    utils::guards::check_admin,
};
use tracing::{debug, info};

/// Creates a new story owned by `caller`.
///
/// Anyone may create a story. The story starts empty (`current_chapter == 0`)
/// and open for chapters.
///
/// # Returns
/// * `Result<StoryId, StoryError>` - The freshly allocated story id, starting at 1.
pub fn create_story(
    ledger: &mut StoryLedger,
    caller: PrincipalId,
    title: String,
) -> Result<StoryId, StoryError> {
    let story_id = ledger.story_ids.allocate()?;
    ledger.stories.insert(Story::new(story_id, title, caller));
    ledger.record_metric(MetricEvent::StoryCreated);

    info!(story_id, owner = %caller, "story created");
    Ok(story_id)
}

/// Appends a chapter authored by `caller` to an open story.
///
/// There is no ownership check: any caller may continue any open story, and
/// doing so marks them as a contributor.
///
/// # Errors
/// * `NotFound` if the story does not exist.
/// * `StoryComplete` if the story has been sealed.
pub fn add_chapter(
    ledger: &mut StoryLedger,
    caller: PrincipalId,
    story_id: StoryId,
    content: String,
) -> Result<ChapterIndex, StoryError> {
    let mut story = load_open_story(ledger, story_id)?;
    let index = story.next_chapter_index();

    let chapter = Chapter {
        content,
        author: caller,
    };
    if !ledger.chapters.insert_new(story_id, index, chapter) {
        return Err(StoryError::InternalError(format!(
            "Chapter {} of story {} already exists",
            index, story_id
        )));
    }
    story.current_chapter = index;
    ledger.stories.insert(story);
    let first_contribution = ledger.contributors.mark(story_id, caller);
    ledger.record_metric(MetricEvent::ChapterAdded);

    info!(story_id, chapter = index, author = %caller, first_contribution, "chapter added");
    Ok(index)
}

/// Seals a story so it accepts no further chapters or plot decisions.
///
/// Restricted to the platform administrator, not the story owner. Sealing an
/// already complete story is accepted and changes nothing.
///
/// # Errors
/// * `Unauthorized` if `caller` is not the administrator (checked first).
/// * `NotFound` if the story does not exist.
pub fn complete_story(
    ledger: &mut StoryLedger,
    caller: PrincipalId,
    story_id: StoryId,
) -> Result<(), StoryError> {
    check_admin(ledger.config.admin_principal(), caller)?;
    let mut story = get_story(ledger, story_id)?;

    if story.is_complete {
        debug!(story_id, "story already complete");
        return Ok(());
    }
    story.is_complete = true;
    ledger.stories.insert(story);
    ledger.record_metric(MetricEvent::StoryCompleted);

    info!(story_id, "story completed");
    Ok(())
}

/// Loads a story and checks it still accepts new content.
pub(crate) fn load_open_story(ledger: &StoryLedger, story_id: StoryId) -> Result<Story, StoryError> {
    let story = get_story(ledger, story_id)?;
    if story.is_complete {
        debug!(story_id, "rejected: story complete");
        return Err(StoryError::StoryComplete(story_id));
    }
    Ok(story)
}

pub fn get_story(ledger: &StoryLedger, story_id: StoryId) -> Result<Story, StoryError> {
    ledger
        .stories
        .get(story_id)
        .ok_or_else(|| StoryError::story_not_found(story_id))
}

pub fn get_story_owner(ledger: &StoryLedger, story_id: StoryId) -> Result<PrincipalId, StoryError> {
    get_story(ledger, story_id).map(|story| story.owner)
}

pub fn get_chapter(
    ledger: &StoryLedger,
    story_id: StoryId,
    index: ChapterIndex,
) -> Result<Chapter, StoryError> {
    ledger.chapters.get(story_id, index).ok_or_else(|| {
        StoryError::NotFound(format!("chapter {} of story {}", index, story_id))
    })
}

/// Returns a page of a story's chapters in reading order.
pub fn list_chapters(
    ledger: &StoryLedger,
    story_id: StoryId,
    offset: u64,
    limit: usize,
) -> Result<ChapterPage, StoryError> {
    let story = get_story(ledger, story_id)?;
    Ok(ChapterPage {
        chapters: ledger.chapters.list_for_story(story_id, offset, limit),
        total: story.current_chapter,
    })
}

pub fn is_contributor(ledger: &StoryLedger, story_id: StoryId, principal: &PrincipalId) -> bool {
    ledger.contributors.is_contributor(story_id, principal)
}

pub fn list_contributors(
    ledger: &StoryLedger,
    story_id: StoryId,
) -> Result<Vec<PrincipalId>, StoryError> {
    get_story(ledger, story_id)?;
    Ok(ledger.contributors.list_for_story(story_id))
}

/// Number of stories ever created, which is also the highest story id.
pub fn story_count(ledger: &StoryLedger) -> u64 {
    ledger.story_ids.current()
}
