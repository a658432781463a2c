//! HTTP adapter for idea endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AddPollRequest, CommentTextRequest, CreateIdeaRequest, ErrorResponse, IdeaListResponse,
    IdeaResponse, UpdateIdeaRequest, VoteRequest,
};
pub use handlers::IdeaHandlers;
pub use routes::idea_routes;
