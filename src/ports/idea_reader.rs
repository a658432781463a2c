//! Idea reader port (read side / CQRS queries).
//!
//! Listing and search over ideas. Results are summaries with derived
//! counters; the full tree is loaded through `IdeaRepository`.

use crate::domain::foundation::{DomainError, IdeaId, Stage, Timestamp, UserId};
use crate::domain::idea::Idea;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default page size for idea and comment listings.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Reader port for idea queries.
#[async_trait]
pub trait IdeaReader: Send + Sync {
    /// List all ideas, newest first, optionally filtered by a search term
    /// matched case-insensitively against problem and solution.
    async fn list(&self, options: &IdeaListOptions) -> Result<IdeaList, DomainError>;

    /// List ideas owned by `owner_id`, newest first.
    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        options: &IdeaListOptions,
    ) -> Result<IdeaList, DomainError>;
}

/// Options for listing ideas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaListOptions {
    /// Maximum number of results to return.
    pub limit: Option<u32>,

    /// Number of results to skip.
    pub offset: Option<u32>,

    /// Free-text filter.
    pub search: Option<String>,
}

impl IdeaListOptions {
    /// Create options for a paginated query. Page numbers start at 1 and
    /// `per_page` is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn paginated(page: u32, per_page: u32) -> Self {
        let per_page = per_page.clamp(1, MAX_PAGE_SIZE);
        Self {
            limit: Some(per_page),
            offset: Some(page.max(1).saturating_sub(1).saturating_mul(per_page)),
            search: None,
        }
    }

    /// Filter by a search term; blank terms are ignored.
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    pub fn limit_or_default(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset_or_default(&self) -> u32 {
        self.offset.unwrap_or(0)
    }

    /// True if `idea` matches the search term (or there is none).
    pub fn matches(&self, idea: &Idea) -> bool {
        match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                idea.problem().to_lowercase().contains(&term)
                    || idea.solution().to_lowercase().contains(&term)
            }
        }
    }
}

/// Paginated list of ideas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaList {
    /// Ideas in this page.
    pub items: Vec<IdeaSummary>,

    /// Total number of matching ideas.
    pub total: u64,

    /// Whether there are more results.
    pub has_more: bool,
}

/// Summary view of an idea for lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaSummary {
    pub id: IdeaId,
    pub owner_id: UserId,
    pub problem: String,
    pub solution: String,
    pub stage: Stage,
    pub link: Option<String>,
    pub number_of_likes: u64,
    pub number_of_dislikes: u64,
    pub poll_count: u64,
    pub comment_count: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Idea> for IdeaSummary {
    fn from(idea: &Idea) -> Self {
        Self {
            id: *idea.id(),
            owner_id: idea.owner_id().clone(),
            problem: idea.problem().to_string(),
            solution: idea.solution().to_string(),
            stage: idea.stage(),
            link: idea.link().map(str::to_string),
            number_of_likes: idea.reactions().like_count() as u64,
            number_of_dislikes: idea.reactions().dislike_count() as u64,
            poll_count: idea.polls().len() as u64,
            comment_count: idea.comments().len() as u64,
            created_at: *idea.created_at(),
            updated_at: *idea.updated_at(),
        }
    }
}
