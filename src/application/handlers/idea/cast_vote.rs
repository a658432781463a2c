//! CastVoteHandler - Command handler for voting in a poll.

use std::sync::Arc;

use crate::domain::foundation::{IdeaId, OptionId, PollId, UserId};
use crate::domain::idea::{Idea, IdeaError};
use crate::ports::IdeaRepository;

use super::load_idea;

/// Command to vote for one option of a poll.
#[derive(Debug, Clone)]
pub struct CastVoteCommand {
    pub idea_id: IdeaId,
    pub poll_id: PollId,
    pub option_id: OptionId,
    pub user_id: UserId,
}

/// Handler for casting votes.
pub struct CastVoteHandler {
    repository: Arc<dyn IdeaRepository>,
}

impl CastVoteHandler {
    pub fn new(repository: Arc<dyn IdeaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CastVoteCommand) -> Result<Idea, IdeaError> {
        let mut idea = load_idea(self.repository.as_ref(), &cmd.idea_id).await?;

        if idea.vote(&cmd.poll_id, &cmd.option_id, &cmd.user_id)? {
            self.repository.update(&idea).await?;
            tracing::debug!(
                idea_id = %cmd.idea_id,
                poll_id = %cmd.poll_id,
                option_id = %cmd.option_id,
                "vote recorded"
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
    use crate::domain::foundation::ErrorCode;

    async fn setup() -> (Arc<InMemoryIdeaStore>, CastVoteHandler, Idea, PollId) {
        let store = Arc::new(InMemoryIdeaStore::new());
        let mut idea = idea_owned_by("owner");
        let poll_id = idea
            .add_poll(&user("owner"), "Useful?".to_string(), vec!["Yes".into(), "No".into()])
            .unwrap();
        store.save(&idea).await.unwrap();
        (store.clone(), CastVoteHandler::new(store), idea, poll_id)
    }

    #[tokio::test]
    async fn changing_vote_moves_it() {
        let (store, handler, idea, poll_id) = setup().await;
        let yes = idea.poll(&poll_id).unwrap().options()[0].id().clone();
        let no = idea.poll(&poll_id).unwrap().options()[1].id().clone();

        for option_id in [yes.clone(), no.clone()] {
            handler
                .handle(CastVoteCommand {
                    idea_id: *idea.id(),
                    poll_id: poll_id.clone(),
                    option_id,
                    user_id: user("voter"),
                })
                .await
                .unwrap();
        }

        let stored = store.find_by_id(idea.id()).await.unwrap().unwrap();
        let poll = stored.poll(&poll_id).unwrap();
        assert_eq!(poll.option(&yes).unwrap().vote_count(), 0);
        assert_eq!(poll.option(&no).unwrap().vote_count(), 1);
    }

    #[tokio::test]
    async fn unknown_option_is_not_found() {
        let (_, handler, idea, poll_id) = setup().await;

        let err = handler
            .handle(CastVoteCommand {
                idea_id: *idea.id(),
                poll_id,
                option_id: OptionId::generate(),
                user_id: user("voter"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::OptionNotFound);
    }
}
