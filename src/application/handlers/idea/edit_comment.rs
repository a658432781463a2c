//! EditCommentHandler - Command handler for editing a comment or reply.

use std::sync::Arc;

use crate::domain::foundation::{IdeaId, UserId};
use crate::domain::idea::{Idea, IdeaError};
use crate::ports::IdeaRepository;

use super::{load_idea, CommentTarget};

/// Command to replace the text of a comment or reply.
#[derive(Debug, Clone)]
pub struct EditCommentCommand {
    pub idea_id: IdeaId,
    pub target: CommentTarget,
    pub caller_id: UserId,
    pub text: String,
}

/// Handler for author edits in the comment tree.
pub struct EditCommentHandler {
    repository: Arc<dyn IdeaRepository>,
}

impl EditCommentHandler {
    pub fn new(repository: Arc<dyn IdeaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: EditCommentCommand) -> Result<Idea, IdeaError> {
        let mut idea = load_idea(self.repository.as_ref(), &cmd.idea_id).await?;

        match &cmd.target {
            CommentTarget::Comment(comment_id) => {
                idea.edit_comment(comment_id, &cmd.caller_id, &cmd.text)?
            }
            CommentTarget::Reply(comment_id, reply_id) => {
                idea.edit_reply(comment_id, reply_id, &cmd.caller_id, &cmd.text)?
            }
        }
        self.repository.update(&idea).await?;

        tracing::debug!(idea_id = %cmd.idea_id, target = ?cmd.target, "comment edited");
        Ok(idea)
    }
}
