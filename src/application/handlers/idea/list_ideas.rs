//! ListIdeasHandler - Query handler for the public feed and "my ideas".

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::idea::IdeaError;
use crate::ports::{IdeaList, IdeaListOptions, IdeaReader, DEFAULT_PAGE_SIZE};

/// Query to list ideas newest-first.
#[derive(Debug, Clone, Default)]
pub struct ListIdeasQuery {
    /// Restrict to ideas owned by this user.
    pub owner_id: Option<UserId>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListIdeasQuery {
    /// All ideas, optionally filtered by a search term.
    pub fn public(search: Option<String>, page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            owner_id: None,
            search,
            page,
            per_page,
        }
    }

    /// Ideas owned by `owner_id`.
    pub fn owned_by(owner_id: UserId, page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            owner_id: Some(owner_id),
            search: None,
            page,
            per_page,
        }
    }

    fn to_list_options(&self) -> IdeaListOptions {
        IdeaListOptions::paginated(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .with_search(self.search.clone())
    }
}

/// Handler for listing ideas.
pub struct ListIdeasHandler {
    reader: Arc<dyn IdeaReader>,
}

impl ListIdeasHandler {
    pub fn new(reader: Arc<dyn IdeaReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ListIdeasQuery) -> Result<IdeaList, IdeaError> {
        let options = query.to_list_options();
        let list = match &query.owner_id {
            Some(owner_id) => self.reader.list_by_owner(owner_id, &options).await?,
            None => self.reader.list(&options).await?,
        };
        Ok(list)
    }
}
