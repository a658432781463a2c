//! AddReplyHandler - Command handler for replying to a comment.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, CommentId, IdeaId, ReplyId};
use crate::domain::idea::{Idea, IdeaError};
use crate::ports::IdeaRepository;

use super::load_idea;

/// Command to reply to a comment.
#[derive(Debug, Clone)]
pub struct AddReplyCommand {
    pub idea_id: IdeaId,
    pub comment_id: CommentId,
    pub author: AuthenticatedUser,
    pub text: String,
}

/// Result of a successful reply.
#[derive(Debug, Clone)]
pub struct AddReplyResult {
    pub idea: Idea,
    pub reply_id: ReplyId,
}

/// Handler for adding replies.
pub struct AddReplyHandler {
    repository: Arc<dyn IdeaRepository>,
}

impl AddReplyHandler {
    pub fn new(repository: Arc<dyn IdeaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: AddReplyCommand) -> Result<AddReplyResult, IdeaError> {
        let mut idea = load_idea(self.repository.as_ref(), &cmd.idea_id).await?;

        let author_name = cmd.author.author_name().to_string();
        let reply_id = idea.add_reply(&cmd.comment_id, cmd.author.id, &author_name, &cmd.text)?;
        self.repository.update(&idea).await?;

        tracing::debug!(
            idea_id = %cmd.idea_id,
            comment_id = %cmd.comment_id,
            reply_id = %reply_id,
            "reply added"
        );
        Ok(AddReplyResult { idea, reply_id })
    }
}
