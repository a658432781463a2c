//! In-memory idea store.
//!
//! Implements both the write and read ports over a shared map. Backs the
//! unit and HTTP integration tests; the binary always uses PostgreSQL.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, IdeaId, UserId};
use crate::domain::idea::Idea;
use crate::ports::{IdeaList, IdeaListOptions, IdeaReader, IdeaRepository, IdeaSummary};

/// In-memory storage for ideas.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdeaStore {
    ideas: Arc<RwLock<HashMap<IdeaId, Idea>>>,
}

impl InMemoryIdeaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored ideas.
    pub async fn len(&self) -> usize {
        self.ideas.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.ideas.read().await.is_empty()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.ideas.write().await.clear();
    }

    async fn page<F>(&self, options: &IdeaListOptions, filter: F) -> IdeaList
    where
        F: Fn(&Idea) -> bool,
    {
        let ideas = self.ideas.read().await;
        let mut matching: Vec<&Idea> = ideas
            .values()
            .filter(|idea| filter(idea) && options.matches(idea))
            .collect();
        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(a.created_at())
                .then_with(|| b.id().cmp(a.id()))
        });

        let total = matching.len() as u64;
        let offset = options.offset_or_default() as usize;
        let limit = options.limit_or_default() as usize;
        let items: Vec<IdeaSummary> = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(IdeaSummary::from)
            .collect();
        let has_more = ((offset + items.len()) as u64) < total;

        IdeaList {
            items,
            total,
            has_more,
        }
    }
}

#[async_trait]
impl IdeaRepository for InMemoryIdeaStore {
    async fn save(&self, idea: &Idea) -> Result<(), DomainError> {
        self.ideas.write().await.insert(*idea.id(), idea.clone());
        Ok(())
    }

    async fn update(&self, idea: &Idea) -> Result<(), DomainError> {
        let mut ideas = self.ideas.write().await;
        match ideas.get_mut(idea.id()) {
            Some(stored) => {
                *stored = idea.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(
                ErrorCode::IdeaNotFound,
                "Idea",
                idea.id(),
            )),
        }
    }

    async fn find_by_id(&self, id: &IdeaId) -> Result<Option<Idea>, DomainError> {
        Ok(self.ideas.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &IdeaId) -> Result<(), DomainError> {
        self.ideas
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(ErrorCode::IdeaNotFound, "Idea", id))
    }

    async fn find_with_auto_delete(&self) -> Result<Vec<Idea>, DomainError> {
        Ok(self
            .ideas
            .read()
            .await
            .values()
            .filter(|idea| idea.auto_delete_after_days().is_some())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl IdeaReader for InMemoryIdeaStore {
    async fn list(&self, options: &IdeaListOptions) -> Result<IdeaList, DomainError> {
        Ok(self.page(options, |_| true).await)
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        options: &IdeaListOptions,
    ) -> Result<IdeaList, DomainError> {
        Ok(self.page(options, |idea| idea.is_owner(owner_id)).await)
    }
}
