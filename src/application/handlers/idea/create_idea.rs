//! CreateIdeaHandler - Command handler for posting a new idea.

use std::sync::Arc;

use crate::domain::foundation::{IdeaId, UserId};
use crate::domain::idea::{Idea, IdeaDraft, IdeaError};
use crate::ports::IdeaRepository;

/// Command to create an idea.
#[derive(Debug, Clone)]
pub struct CreateIdeaCommand {
    pub owner_id: UserId,
    pub draft: IdeaDraft,
}

/// Handler for creating ideas.
pub struct CreateIdeaHandler {
    repository: Arc<dyn IdeaRepository>,
}

impl CreateIdeaHandler {
    pub fn new(repository: Arc<dyn IdeaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateIdeaCommand) -> Result<Idea, IdeaError> {
        let idea = Idea::create(IdeaId::new(), cmd.owner_id, cmd.draft)?;
        self.repository.save(&idea).await?;

        tracing::info!(idea_id = %idea.id(), owner_id = %idea.owner_id(), "idea created");
        Ok(idea)
    }
}
