//! ExportIdeaHandler - Query handler for downloading an idea as a document.

use std::sync::Arc;

use crate::domain::foundation::{IdeaId, UserId};
use crate::domain::idea::IdeaError;
use crate::ports::{IdeaDocumentRenderer, IdeaRepository, RenderedDocument};

use super::load_idea;

/// Query to export an idea. Any authenticated user may export.
#[derive(Debug, Clone)]
pub struct ExportIdeaQuery {
    pub idea_id: IdeaId,
    pub requested_by: UserId,
}

/// Handler for idea export.
pub struct ExportIdeaHandler {
    repository: Arc<dyn IdeaRepository>,
    renderer: Arc<dyn IdeaDocumentRenderer>,
}

impl ExportIdeaHandler {
    pub fn new(
        repository: Arc<dyn IdeaRepository>,
        renderer: Arc<dyn IdeaDocumentRenderer>,
    ) -> Self {
        Self {
            repository,
            renderer,
        }
    }

    pub async fn handle(&self, query: ExportIdeaQuery) -> Result<RenderedDocument, IdeaError> {
        let idea = load_idea(self.repository.as_ref(), &query.idea_id).await?;

        let document = self.renderer.render(&idea).await.map_err(|e| {
            tracing::error!(idea_id = %query.idea_id, error = %e, "idea export failed");
            IdeaError::ExportFailed(e.to_string())
        })?;

        tracing::debug!(
            idea_id = %query.idea_id,
            requested_by = %query.requested_by,
            bytes = document.bytes.len(),
            "idea exported"
        );
        Ok(document)
    }
}
