//! AddCommentHandler - Command handler for commenting on an idea.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, CommentId, IdeaId};
use crate::domain::idea::{Idea, IdeaError};
use crate::ports::IdeaRepository;

use super::load_idea;

/// Command to add a top-level comment.
#[derive(Debug, Clone)]
pub struct AddCommentCommand {
    pub idea_id: IdeaId,
    pub author: AuthenticatedUser,
    pub text: String,
}

/// Result of a successful comment.
#[derive(Debug, Clone)]
pub struct AddCommentResult {
    pub idea: Idea,
    pub comment_id: CommentId,
}

/// Handler for adding comments.
pub struct AddCommentHandler {
    repository: Arc<dyn IdeaRepository>,
}

impl AddCommentHandler {
    pub fn new(repository: Arc<dyn IdeaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: AddCommentCommand) -> Result<AddCommentResult, IdeaError> {
        let mut idea = load_idea(self.repository.as_ref(), &cmd.idea_id).await?;

        let author_name = cmd.author.author_name().to_string();
        let comment_id = idea.add_comment(cmd.author.id, &author_name, &cmd.text)?;
        self.repository.update(&idea).await?;

        tracing::debug!(idea_id = %cmd.idea_id, comment_id = %comment_id, "comment added");
        Ok(AddCommentResult { idea, comment_id })
    }
}
