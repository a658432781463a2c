//! ReactToIdeaHandler - Command handler for liking or disliking an idea.

use std::sync::Arc;

use crate::domain::foundation::{IdeaId, UserId};
use crate::domain::idea::{Idea, IdeaError, Reaction};
use crate::ports::IdeaRepository;

use super::load_idea;

/// Command to record a reaction on an idea.
#[derive(Debug, Clone)]
pub struct ReactToIdeaCommand {
    pub idea_id: IdeaId,
    pub user_id: UserId,
    pub reaction: Reaction,
}

/// Handler for idea reactions.
pub struct ReactToIdeaHandler {
    repository: Arc<dyn IdeaRepository>,
}

impl ReactToIdeaHandler {
    pub fn new(repository: Arc<dyn IdeaRepository>) -> Self {
        Self { repository }
    }

    /// Repeating a reaction is a no-op and skips the write.
    pub async fn handle(&self, cmd: ReactToIdeaCommand) -> Result<Idea, IdeaError> {
        let mut idea = load_idea(self.repository.as_ref(), &cmd.idea_id).await?;

        if idea.react(&cmd.user_id, cmd.reaction) {
            self.repository.update(&idea).await?;
            tracing::debug!(idea_id = %cmd.idea_id, reaction = ?cmd.reaction, "idea reaction recorded");
        }
        Ok(idea)
    }
}
