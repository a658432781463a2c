//! UpdateIdeaHandler - Command handler for owner edits.

use std::sync::Arc;

use crate::domain::foundation::{IdeaId, UserId};
use crate::domain::idea::{Idea, IdeaError, IdeaPatch};
use crate::ports::IdeaRepository;

use super::load_idea;

/// Command to apply a patch to an idea.
#[derive(Debug, Clone)]
pub struct UpdateIdeaCommand {
    pub idea_id: IdeaId,
    pub caller_id: UserId,
    pub patch: IdeaPatch,
}

/// Handler for updating ideas.
pub struct UpdateIdeaHandler {
    repository: Arc<dyn IdeaRepository>,
}

impl UpdateIdeaHandler {
    pub fn new(repository: Arc<dyn IdeaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateIdeaCommand) -> Result<Idea, IdeaError> {
        let mut idea = load_idea(self.repository.as_ref(), &cmd.idea_id).await?;

        idea.update(&cmd.caller_id, cmd.patch)?;
        self.repository.update(&idea).await?;

        tracing::debug!(idea_id = %cmd.idea_id, "idea updated");
        Ok(idea)
    }
}
