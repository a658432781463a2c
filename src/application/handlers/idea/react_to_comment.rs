//! ReactToCommentHandler - Command handler for reactions in the comment tree.

use std::sync::Arc;

use crate::domain::foundation::{IdeaId, UserId};
use crate::domain::idea::{Idea, IdeaError, Reaction};
use crate::ports::IdeaRepository;

use super::{load_idea, CommentTarget};

/// Command to like or dislike a comment or reply.
#[derive(Debug, Clone)]
pub struct ReactToCommentCommand {
    pub idea_id: IdeaId,
    pub target: CommentTarget,
    pub user_id: UserId,
    pub reaction: Reaction,
}

/// Handler for comment and reply reactions.
pub struct ReactToCommentHandler {
    repository: Arc<dyn IdeaRepository>,
}

impl ReactToCommentHandler {
    pub fn new(repository: Arc<dyn IdeaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: ReactToCommentCommand) -> Result<Idea, IdeaError> {
        let mut idea = load_idea(self.repository.as_ref(), &cmd.idea_id).await?;

        let changed = match &cmd.target {
            CommentTarget::Comment(comment_id) => {
                idea.react_to_comment(comment_id, &cmd.user_id, cmd.reaction)?
            }
            CommentTarget::Reply(comment_id, reply_id) => {
                idea.react_to_reply(comment_id, reply_id, &cmd.user_id, cmd.reaction)?
            }
        };
        if changed {
            self.repository.update(&idea).await?;
            tracing::debug!(
                idea_id = %cmd.idea_id,
                target = ?cmd.target,
                reaction = ?cmd.reaction,
                "comment reaction recorded"
            );
        }
        Ok(idea)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryIdeaStore;
    use crate::application::handlers::idea::test_support::{idea_owned_by, user};

    #[tokio::test]
    async fn reply_reactions_are_exclusive() {
        let store = Arc::new(InMemoryIdeaStore::new());
        let mut idea = idea_owned_by("owner");
        let comment_id = idea.add_comment(user("a"), "A", "Nice idea").unwrap();
        let reply_id = idea.add_reply(&comment_id, user("b"), "B", "agreed").unwrap();
        store.save(&idea).await.unwrap();
        let handler = ReactToCommentHandler::new(store.clone());

        for reaction in [Reaction::Like, Reaction::Dislike] {
            handler
                .handle(ReactToCommentCommand {
                    idea_id: *idea.id(),
                    target: CommentTarget::Reply(comment_id.clone(), reply_id.clone()),
                    user_id: user("fan"),
                    reaction,
                })
                .await
                .unwrap();
        }

        let stored = store.find_by_id(idea.id()).await.unwrap().unwrap();
        let reactions = stored
            .comment(&comment_id)
            .unwrap()
            .reply(&reply_id)
            .unwrap()
            .reactions();
        assert_eq!(reactions.like_count(), 0);
        assert_eq!(reactions.dislike_count(), 1);
    }

    #[tokio::test]
    async fn liking_a_comment_counts_once() {
        let store = Arc::new(InMemoryIdeaStore::new());
        let mut idea = idea_owned_by("owner");
        let comment_id = idea.add_comment(user("a"), "A", "Nice idea").unwrap();
        store.save(&idea).await.unwrap();
        let handler = ReactToCommentHandler::new(store.clone());

        for _ in 0..2 {
            handler
                .handle(ReactToCommentCommand {
                    idea_id: *idea.id(),
                    target: CommentTarget::Comment(comment_id.clone()),
                    user_id: user("fan"),
                    reaction: Reaction::Like,
                })
                .await
                .unwrap();
        }

        let stored = store.find_by_id(idea.id()).await.unwrap().unwrap();
        assert_eq!(stored.comment(&comment_id).unwrap().reactions().like_count(), 1);
    }
}
