//! AddPollHandler - Command handler for appending a poll.

use std::sync::Arc;

use crate::domain::foundation::{IdeaId, PollId, UserId};
use crate::domain::idea::{Idea, IdeaError};
use crate::ports::IdeaRepository;

use super::load_idea;

/// Command to add a poll to an idea.
#[derive(Debug, Clone)]
pub struct AddPollCommand {
    pub idea_id: IdeaId,
    pub caller_id: UserId,
    pub question: String,
    pub options: Vec<String>,
}

/// Result of a successful poll addition.
#[derive(Debug, Clone)]
pub struct AddPollResult {
    pub idea: Idea,
    pub poll_id: PollId,
}

/// Handler for adding polls.
pub struct AddPollHandler {
    repository: Arc<dyn IdeaRepository>,
}

impl AddPollHandler {
    pub fn new(repository: Arc<dyn IdeaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: AddPollCommand) -> Result<AddPollResult, IdeaError> {
        let mut idea = load_idea(self.repository.as_ref(), &cmd.idea_id).await?;

        let poll_id = idea.add_poll(&cmd.caller_id, cmd.question, cmd.options)?;
        self.repository.update(&idea).await?;

        tracing::debug!(idea_id = %cmd.idea_id, poll_id = %poll_id, "poll added");
        Ok(AddPollResult { idea, poll_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryIdeaStore;
    use crate::application::handlers::idea::test_support::{idea_owned_by, user};

    async fn setup() -> (Arc<InMemoryIdeaStore>, AddPollHandler, Idea) {
        let store = Arc::new(InMemoryIdeaStore::new());
        let idea = idea_owned_by("owner");
        store.save(&idea).await.unwrap();
        (store.clone(), AddPollHandler::new(store), idea)
    }

    #[tokio::test]
    async fn owner_adds_poll_with_fresh_ids() {
        let (store, handler, idea) = setup().await;

        let result = handler
            .handle(AddPollCommand {
                idea_id: *idea.id(),
                caller_id: user("owner"),
                question: "Useful?".to_string(),
                options: vec!["Yes".to_string(), "No".to_string()],
            })
            .await
            .unwrap();

        let stored = store.find_by_id(idea.id()).await.unwrap().unwrap();
        let poll = stored.poll(&result.poll_id).unwrap();
        assert_eq!(poll.options().len(), 2);
        assert_eq!(poll.total_votes(), 0);
    }

    #[tokio::test]
    async fn single_option_is_rejected() {
        let (store, handler, idea) = setup().await;

        let err = handler
            .handle(AddPollCommand {
                idea_id: *idea.id(),
                caller_id: user("owner"),
                question: "Useful?".to_string(),
                options: vec!["Yes".to_string()],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, IdeaError::ValidationFailed { .. }));
        assert!(store.find_by_id(idea.id()).await.unwrap().unwrap().polls().is_empty());
    }

    #[tokio::test]
    async fn stranger_cannot_add_poll() {
        let (_, handler, idea) = setup().await;

        let err = handler
            .handle(AddPollCommand {
                idea_id: *idea.id(),
                caller_id: user("stranger"),
                question: "Useful?".to_string(),
                options: vec!["Yes".to_string(), "No".to_string()],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, IdeaError::Forbidden(_)));
    }
}
