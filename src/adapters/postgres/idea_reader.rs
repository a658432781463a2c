//! PostgreSQL implementation of IdeaReader.
//!
//! Lists are ordered by `created_at` descending. Search uses `ILIKE` over
//! the denormalised problem/solution columns, backed by trigram indexes.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{IdeaList, IdeaListOptions, IdeaReader, IdeaSummary};

use super::idea_repository::row_to_idea;

/// PostgreSQL implementation of IdeaReader.
#[derive(Clone)]
pub struct PostgresIdeaReader {
    pool: PgPool,
}

impl PostgresIdeaReader {
    /// Creates a new PostgresIdeaReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn page(
        &self,
        owner_id: Option<&UserId>,
        options: &IdeaListOptions,
    ) -> Result<IdeaList, DomainError> {
        let owner = owner_id.map(|id| id.as_str().to_string());
        let pattern = options.search.as_deref().map(like_pattern);
        let limit = options.limit_or_default() as i64;
        let offset = options.offset_or_default() as i64;

        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM ideas
            WHERE ($1::text IS NULL OR owner_id = $1)
              AND ($2::text IS NULL OR problem ILIKE $2 OR solution ILIKE $2)
            "#,
        )
        .bind(&owner)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count ideas: {}", e)))?;

        let rows = sqlx::query(
            r#"
            SELECT document FROM ideas
            WHERE ($1::text IS NULL OR owner_id = $1)
              AND ($2::text IS NULL OR problem ILIKE $2 OR solution ILIKE $2)
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(&owner)
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list ideas: {}", e)))?;

        let items = rows
            .into_iter()
            .map(|row| row_to_idea(row).map(|idea| IdeaSummary::from(&idea)))
            .collect::<Result<Vec<_>, _>>()?;
        let has_more = offset + (items.len() as i64) < total;

        Ok(IdeaList {
            items,
            total: total as u64,
            has_more,
        })
    }
}

#[async_trait]
impl IdeaReader for PostgresIdeaReader {
    async fn list(&self, options: &IdeaListOptions) -> Result<IdeaList, DomainError> {
        self.page(None, options).await
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        options: &IdeaListOptions,
    ) -> Result<IdeaList, DomainError> {
        self.page(Some(owner_id), options).await
    }
}

/// Wraps a search term for `ILIKE`, escaping its wildcards.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
