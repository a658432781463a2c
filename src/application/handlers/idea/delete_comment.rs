//! DeleteCommentHandler - Command handler for removing a comment or reply.

use std::sync::Arc;

use crate::domain::foundation::{IdeaId, UserId};
use crate::domain::idea::{Idea, IdeaError};
use crate::ports::IdeaRepository;

use super::{load_idea, CommentTarget};

/// Command to delete a comment (with its replies) or a single reply.
#[derive(Debug, Clone)]
pub struct DeleteCommentCommand {
    pub idea_id: IdeaId,
    pub target: CommentTarget,
    pub caller_id: UserId,
}

/// Handler for author deletions in the comment tree.
pub struct DeleteCommentHandler {
    repository: Arc<dyn IdeaRepository>,
}

impl DeleteCommentHandler {
    pub fn new(repository: Arc<dyn IdeaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteCommentCommand) -> Result<Idea, IdeaError> {
        let mut idea = load_idea(self.repository.as_ref(), &cmd.idea_id).await?;

        match &cmd.target {
            CommentTarget::Comment(comment_id) => idea.delete_comment(comment_id, &cmd.caller_id)?,
            CommentTarget::Reply(comment_id, reply_id) => {
                idea.delete_reply(comment_id, reply_id, &cmd.caller_id)?
            }
        }
        self.repository.update(&idea).await?;

        tracing::debug!(idea_id = %cmd.idea_id, target = ?cmd.target, "comment deleted");
        Ok(idea)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryIdeaStore;
    use crate::application::handlers::idea::test_support::{idea_owned_by, user};

    #[tokio::test]
    async fn deleting_comment_removes_its_replies() {
        let store = Arc::new(InMemoryIdeaStore::new());
        let mut idea = idea_owned_by("owner");
        let comment_id = idea.add_comment(user("a"), "A", "Nice idea").unwrap();
        idea.add_reply(&comment_id, user("b"), "B", "agreed").unwrap();
        store.save(&idea).await.unwrap();
        let handler = DeleteCommentHandler::new(store.clone());

        handler
            .handle(DeleteCommentCommand {
                idea_id: *idea.id(),
                target: CommentTarget::Comment(comment_id),
                caller_id: user("a"),
            })
            .await
            .unwrap();

        let stored = store.find_by_id(idea.id()).await.unwrap().unwrap();
        assert!(stored.comments().is_empty());
    }

    #[tokio::test]
    async fn idea_owner_cannot_delete_someone_elses_reply() {
        let store = Arc::new(InMemoryIdeaStore::new());
        let mut idea = idea_owned_by("owner");
        let comment_id = idea.add_comment(user("a"), "A", "Nice idea").unwrap();
        let reply_id = idea.add_reply(&comment_id, user("b"), "B", "agreed").unwrap();
        store.save(&idea).await.unwrap();
        let handler = DeleteCommentHandler::new(store.clone());

        let err = handler
            .handle(DeleteCommentCommand {
                idea_id: *idea.id(),
                target: CommentTarget::Reply(comment_id.clone(), reply_id),
                caller_id: user("owner"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, IdeaError::Forbidden(_)));
        let stored = store.find_by_id(idea.id()).await.unwrap().unwrap();
        assert_eq!(stored.comment(&comment_id).unwrap().replies().len(), 1);
    }
}
