//! HTTP routes for idea endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    add_comment, add_poll, add_reply, cast_vote, create_idea, delete_comment, delete_idea,
    delete_reply, dislike_comment, dislike_idea, dislike_reply, edit_comment, edit_reply,
    export_idea, get_idea, like_comment, like_idea, like_reply, list_comments, list_ideas,
    list_my_ideas, update_idea, IdeaHandlers,
};

/// Creates the idea router with all endpoints.
pub fn idea_routes(handlers: IdeaHandlers) -> Router {
    Router::new()
        .route("/", post(create_idea).get(list_ideas))
        .route("/mine", get(list_my_ideas))
        .route("/:id", get(get_idea).patch(update_idea).delete(delete_idea))
        .route("/:id/like", post(like_idea))
        .route("/:id/dislike", post(dislike_idea))
        .route("/:id/export", get(export_idea))
        .route("/:id/polls", post(add_poll))
        .route("/:id/polls/:poll_id/votes", post(cast_vote))
        .route("/:id/comments", get(list_comments).post(add_comment))
        .route(
            "/:id/comments/:comment_id",
            patch(edit_comment).delete(delete_comment),
        )
        .route("/:id/comments/:comment_id/like", post(like_comment))
        .route("/:id/comments/:comment_id/dislike", post(dislike_comment))
        .route("/:id/comments/:comment_id/replies", post(add_reply))
        .route(
            "/:id/comments/:comment_id/replies/:reply_id",
            patch(edit_reply).delete(delete_reply),
        )
        .route(
            "/:id/comments/:comment_id/replies/:reply_id/like",
            post(like_reply),
        )
        .route(
            "/:id/comments/:comment_id/replies/:reply_id/dislike",
            post(dislike_reply),
        )
        .with_state(handlers)
}
