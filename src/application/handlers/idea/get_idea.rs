//! GetIdeaHandler - Query handler for a single idea.

use std::sync::Arc;

use crate::domain::foundation::IdeaId;
use crate::domain::idea::{Idea, IdeaError};
use crate::ports::IdeaRepository;

use super::load_idea;

/// Query for an idea with its full tree.
#[derive(Debug, Clone)]
pub struct GetIdeaQuery {
    pub idea_id: IdeaId,
}

/// Handler for retrieving ideas.
pub struct GetIdeaHandler {
    repository: Arc<dyn IdeaRepository>,
}

impl GetIdeaHandler {
    pub fn new(repository: Arc<dyn IdeaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetIdeaQuery) -> Result<Idea, IdeaError> {
        load_idea(self.repository.as_ref(), &query.idea_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryIdeaStore;
    use crate::application::handlers::idea::test_support::idea_owned_by;

    #[tokio::test]
    async fn returns_stored_idea() {
        let store = Arc::new(InMemoryIdeaStore::new());
        let idea = idea_owned_by("owner");
        store.save(&idea).await.unwrap();

        let found = GetIdeaHandler::new(store)
            .handle(GetIdeaQuery { idea_id: *idea.id() })
            .await
            .unwrap();
        assert_eq!(found, idea);
    }

    #[tokio::test]
    async fn missing_idea_is_not_found() {
        let id = IdeaId::new();
        let err = GetIdeaHandler::new(Arc::new(InMemoryIdeaStore::new()))
            .handle(GetIdeaQuery { idea_id: id })
            .await
            .unwrap_err();
        assert_eq!(err, IdeaError::NotFound(id));
    }
}
