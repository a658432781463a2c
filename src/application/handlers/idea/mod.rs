//! Idea command and query handlers.
//!
//! Every command follows the same flow: load the aggregate, let it
//! authorize and apply the mutation, then write the whole document back.

mod add_comment;
mod add_poll;
mod add_reply;
mod cast_vote;
mod comment_target;
mod create_idea;
mod delete_comment;
mod delete_idea;
mod edit_comment;
mod export_idea;
mod get_idea;
mod list_comments;
mod list_ideas;
mod react_to_comment;
mod react_to_idea;
mod update_idea;

#[cfg(test)]
pub(crate) mod test_support;

pub use add_comment::{AddCommentCommand, AddCommentHandler, AddCommentResult};
pub use add_poll::{AddPollCommand, AddPollHandler, AddPollResult};
pub use add_reply::{AddReplyCommand, AddReplyHandler, AddReplyResult};
pub use cast_vote::{CastVoteCommand, CastVoteHandler};
pub use comment_target::CommentTarget;
pub use create_idea::{CreateIdeaCommand, CreateIdeaHandler};
pub use delete_comment::{DeleteCommentCommand, DeleteCommentHandler};
pub use delete_idea::{DeleteIdeaCommand, DeleteIdeaHandler};
pub use edit_comment::{EditCommentCommand, EditCommentHandler};
pub use export_idea::{ExportIdeaHandler, ExportIdeaQuery};
pub use get_idea::{GetIdeaHandler, GetIdeaQuery};
pub use list_comments::{CommentPage, ListCommentsHandler, ListCommentsQuery};
pub use list_ideas::{ListIdeasHandler, ListIdeasQuery};
pub use react_to_comment::{ReactToCommentCommand, ReactToCommentHandler};
pub use react_to_idea::{ReactToIdeaCommand, ReactToIdeaHandler};
pub use update_idea::{UpdateIdeaCommand, UpdateIdeaHandler};

use crate::domain::foundation::IdeaId;
use crate::domain::idea::{Idea, IdeaError};
use crate::ports::IdeaRepository;

/// Loads an idea or fails with `IdeaError::NotFound`.
pub(crate) async fn load_idea(
    repository: &dyn IdeaRepository,
    idea_id: &IdeaId,
) -> Result<Idea, IdeaError> {
    repository
        .find_by_id(idea_id)
        .await?
        .ok_or_else(|| IdeaError::not_found(*idea_id))
}
