//! PostgreSQL implementation of IdeaRepository.
//!
//! Persists Idea aggregates as a JSONB document per row, with a few
//! denormalised columns kept in step on every write.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, IdeaId};
use crate::domain::idea::Idea;
use crate::ports::IdeaRepository;

/// PostgreSQL implementation of IdeaRepository.
#[derive(Clone)]
pub struct PostgresIdeaRepository {
    pool: PgPool,
}

impl PostgresIdeaRepository {
    /// Creates a new PostgresIdeaRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdeaRepository for PostgresIdeaRepository {
    async fn save(&self, idea: &Idea) -> Result<(), DomainError> {
        let document = idea_to_document(idea)?;

        sqlx::query(
            r#"
            INSERT INTO ideas (
                id, owner_id, problem, solution, auto_delete_after_days,
                document, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(idea.id().as_uuid())
        .bind(idea.owner_id().as_str())
        .bind(idea.problem())
        .bind(idea.solution())
        .bind(idea.auto_delete_after_days().map(|d| d as i32))
        .bind(document)
        .bind(idea.created_at().as_datetime())
        .bind(idea.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert idea: {}", e)))?;

        Ok(())
    }

    async fn update(&self, idea: &Idea) -> Result<(), DomainError> {
        let document = idea_to_document(idea)?;

        let result = sqlx::query(
            r#"
            UPDATE ideas SET
                problem = $2,
                solution = $3,
                auto_delete_after_days = $4,
                document = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(idea.id().as_uuid())
        .bind(idea.problem())
        .bind(idea.solution())
        .bind(idea.auto_delete_after_days().map(|d| d as i32))
        .bind(document)
        .bind(idea.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update idea: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::IdeaNotFound,
                "Idea",
                idea.id(),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &IdeaId) -> Result<Option<Idea>, DomainError> {
        let row = sqlx::query("SELECT document FROM ideas WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch idea: {}", e)))?;

        row.map(row_to_idea).transpose()
    }

    async fn delete(&self, id: &IdeaId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM ideas WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete idea: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::IdeaNotFound, "Idea", id));
        }

        Ok(())
    }

    async fn find_with_auto_delete(&self) -> Result<Vec<Idea>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT document FROM ideas
            WHERE auto_delete_after_days IS NOT NULL
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to fetch ideas with auto-delete: {}", e))
        })?;

        rows.into_iter().map(row_to_idea).collect()
    }
}

fn idea_to_document(idea: &Idea) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(idea)
        .map_err(|e| DomainError::database(format!("Failed to serialize idea: {}", e)))
}

/// Decodes the `document` column of a row into an Idea.
pub(crate) fn row_to_idea(row: PgRow) -> Result<Idea, DomainError> {
    let document: serde_json::Value = row
        .try_get("document")
        .map_err(|e| DomainError::database(format!("Failed to read idea document: {}", e)))?;
    serde_json::from_value(document)
        .map_err(|e| DomainError::database(format!("Corrupt idea document: {}", e)))
}
