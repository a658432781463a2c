//! ListCommentsHandler - Query handler for paging through comments.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::IdeaId;
use crate::domain::idea::{Comment, IdeaError};
use crate::ports::{IdeaRepository, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use super::load_idea;

/// Query for one page of an idea's comments.
#[derive(Debug, Clone)]
pub struct ListCommentsQuery {
    pub idea_id: IdeaId,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// A page of comments in stored (newest-first) order.
#[derive(Debug, Clone, Serialize)]
pub struct CommentPage {
    pub items: Vec<Comment>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub has_more: bool,
}

/// Handler for listing comments.
pub struct ListCommentsHandler {
    repository: Arc<dyn IdeaRepository>,
}

impl ListCommentsHandler {
    pub fn new(repository: Arc<dyn IdeaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListCommentsQuery) -> Result<CommentPage, IdeaError> {
        let idea = load_idea(self.repository.as_ref(), &query.idea_id).await?;

        let page = query.page.unwrap_or(1).max(1);
        let per_page = query
            .per_page
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = ((page - 1) as usize).saturating_mul(per_page as usize);

        let comments = idea.comments();
        let items: Vec<Comment> = comments
            .iter()
            .skip(offset)
            .take(per_page as usize)
            .cloned()
            .collect();
        let has_more = offset.saturating_add(items.len()) < comments.len();

        Ok(CommentPage {
            items,
            page,
            per_page,
            total: comments.len() as u64,
            has_more,
        })
    }
}
