//! Idea repository port (write side).
//!
//! Defines the contract for persisting and retrieving Idea aggregates.
//! Each idea is written as a whole document; a single `update` call
//! replaces the previous tree atomically.

use crate::domain::foundation::{DomainError, IdeaId};
use crate::domain::idea::Idea;
use async_trait::async_trait;

/// Repository port for Idea aggregate persistence.
///
/// Implementations must ensure:
/// - Single-document atomic writes (no partially stored trees)
/// - Last writer wins on concurrent updates
#[async_trait]
pub trait IdeaRepository: Send + Sync {
    /// Save a new idea.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, idea: &Idea) -> Result<(), DomainError>;

    /// Replace an existing idea with its new state.
    ///
    /// # Errors
    ///
    /// - `IdeaNotFound` if idea doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, idea: &Idea) -> Result<(), DomainError>;

    /// Find an idea by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &IdeaId) -> Result<Option<Idea>, DomainError>;

    /// Hard-delete an idea and everything nested inside it.
    ///
    /// # Errors
    ///
    /// - `IdeaNotFound` if idea doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &IdeaId) -> Result<(), DomainError>;

    /// All ideas that carry an auto-delete window, for the sweeper.
    async fn find_with_auto_delete(&self) -> Result<Vec<Idea>, DomainError>;
}
