//! Fixtures shared by the idea handler tests.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, IdeaId, UserId};
use crate::domain::idea::{Idea, IdeaDraft};
use crate::ports::IdeaRepository;

pub fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

pub fn draft() -> IdeaDraft {
    IdeaDraft {
        problem: "X".to_string(),
        solution: "Y".to_string(),
        stage: Some("Concept".to_string()),
        ..Default::default()
    }
}

pub fn idea_owned_by(owner: &str) -> Idea {
    Idea::create(IdeaId::new(), user(owner), draft()).unwrap()
}

/// Repository that loads a fixed idea and fails every write.
pub struct FailingWrites(pub Idea);

#[async_trait]
impl IdeaRepository for FailingWrites {
    async fn save(&self, _idea: &Idea) -> Result<(), DomainError> {
        Err(DomainError::database("Simulated save failure"))
    }

    async fn update(&self, _idea: &Idea) -> Result<(), DomainError> {
        Err(DomainError::database("Simulated update failure"))
    }

    async fn find_by_id(&self, id: &IdeaId) -> Result<Option<Idea>, DomainError> {
        Ok((self.0.id() == id).then(|| self.0.clone()))
    }

    async fn delete(&self, _id: &IdeaId) -> Result<(), DomainError> {
        Err(DomainError::database("Simulated delete failure"))
    }

    async fn find_with_auto_delete(&self) -> Result<Vec<Idea>, DomainError> {
        Ok(vec![self.0.clone()])
    }
}
