//! DeleteIdeaHandler - Command handler for owner deletion.

use std::sync::Arc;

use crate::domain::foundation::{IdeaId, UserId};
use crate::domain::idea::IdeaError;
use crate::ports::IdeaRepository;

use super::load_idea;

/// Command to hard-delete an idea.
#[derive(Debug, Clone)]
pub struct DeleteIdeaCommand {
    pub idea_id: IdeaId,
    pub caller_id: UserId,
}

/// Handler for deleting ideas.
pub struct DeleteIdeaHandler {
    repository: Arc<dyn IdeaRepository>,
}

impl DeleteIdeaHandler {
    pub fn new(repository: Arc<dyn IdeaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteIdeaCommand) -> Result<(), IdeaError> {
        let idea = load_idea(self.repository.as_ref(), &cmd.idea_id).await?;
        idea.authorize_owner(&cmd.caller_id)?;

        self.repository.delete(&cmd.idea_id).await?;

        tracing::info!(idea_id = %cmd.idea_id, "idea deleted");
        Ok(())
    }
}
