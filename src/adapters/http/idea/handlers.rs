//! HTTP handlers for idea endpoints.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::{
    AddCommentCommand, AddCommentHandler, AddPollCommand, AddPollHandler, AddReplyCommand,
    AddReplyHandler, CastVoteCommand, CastVoteHandler, CommentTarget, CreateIdeaCommand,
    CreateIdeaHandler, DeleteCommentCommand, DeleteCommentHandler, DeleteIdeaCommand,
    DeleteIdeaHandler, EditCommentCommand, EditCommentHandler, ExportIdeaHandler,
    ExportIdeaQuery, GetIdeaHandler, GetIdeaQuery, ListCommentsHandler, ListCommentsQuery,
    ListIdeasHandler, ListIdeasQuery, ReactToCommentCommand, ReactToCommentHandler,
    ReactToIdeaCommand, ReactToIdeaHandler, UpdateIdeaCommand, UpdateIdeaHandler,
};
use crate::domain::foundation::{CommentId, IdeaId, OptionId, PollId, ReplyId, UserId};
use crate::domain::idea::{Idea, IdeaDraft, IdeaError, IdeaPatch, Reaction};
use crate::ports::{IdeaDocumentRenderer, IdeaReader, IdeaRepository};

use super::dto::{
    AddCommentResponse, AddPollRequest, AddPollResponse, AddReplyResponse, CommentPageResponse,
    CommentTextRequest, CreateIdeaRequest, ErrorResponse, IdeaListResponse, IdeaResponse,
    ListIdeasParams, PageParams, UpdateIdeaRequest, VoteRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct IdeaHandlers {
    create_handler: Arc<CreateIdeaHandler>,
    update_handler: Arc<UpdateIdeaHandler>,
    delete_handler: Arc<DeleteIdeaHandler>,
    react_handler: Arc<ReactToIdeaHandler>,
    add_poll_handler: Arc<AddPollHandler>,
    vote_handler: Arc<CastVoteHandler>,
    add_comment_handler: Arc<AddCommentHandler>,
    add_reply_handler: Arc<AddReplyHandler>,
    edit_comment_handler: Arc<EditCommentHandler>,
    delete_comment_handler: Arc<DeleteCommentHandler>,
    react_comment_handler: Arc<ReactToCommentHandler>,
    get_handler: Arc<GetIdeaHandler>,
    list_handler: Arc<ListIdeasHandler>,
    list_comments_handler: Arc<ListCommentsHandler>,
    export_handler: Arc<ExportIdeaHandler>,
}

impl IdeaHandlers {
    /// Wires every idea handler onto the same set of ports.
    pub fn new(
        repository: Arc<dyn IdeaRepository>,
        reader: Arc<dyn IdeaReader>,
        renderer: Arc<dyn IdeaDocumentRenderer>,
    ) -> Self {
        Self {
            create_handler: Arc::new(CreateIdeaHandler::new(repository.clone())),
            update_handler: Arc::new(UpdateIdeaHandler::new(repository.clone())),
            delete_handler: Arc::new(DeleteIdeaHandler::new(repository.clone())),
            react_handler: Arc::new(ReactToIdeaHandler::new(repository.clone())),
            add_poll_handler: Arc::new(AddPollHandler::new(repository.clone())),
            vote_handler: Arc::new(CastVoteHandler::new(repository.clone())),
            add_comment_handler: Arc::new(AddCommentHandler::new(repository.clone())),
            add_reply_handler: Arc::new(AddReplyHandler::new(repository.clone())),
            edit_comment_handler: Arc::new(EditCommentHandler::new(repository.clone())),
            delete_comment_handler: Arc::new(DeleteCommentHandler::new(repository.clone())),
            react_comment_handler: Arc::new(ReactToCommentHandler::new(repository.clone())),
            get_handler: Arc::new(GetIdeaHandler::new(repository.clone())),
            list_handler: Arc::new(ListIdeasHandler::new(reader)),
            list_comments_handler: Arc::new(ListCommentsHandler::new(repository.clone())),
            export_handler: Arc::new(ExportIdeaHandler::new(repository, renderer)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Idea endpoints
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/ideas - Post a new idea
pub async fn create_idea(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateIdeaRequest>,
) -> Response {
    let draft = match IdeaDraft::try_from(req) {
        Ok(draft) => draft,
        Err(e) => return (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(e))).into_response(),
    };

    let cmd = CreateIdeaCommand {
        owner_id: user.id,
        draft,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(idea) => (StatusCode::CREATED, Json(IdeaResponse::from(&idea))).into_response(),
        Err(e) => handle_idea_error(e),
    }
}

/// GET /api/ideas - List and search all ideas
pub async fn list_ideas(
    State(handlers): State<IdeaHandlers>,
    Query(params): Query<ListIdeasParams>,
) -> Response {
    let query = ListIdeasQuery::public(params.q, params.page, params.per_page);

    match handlers.list_handler.handle(query).await {
        Ok(list) => (StatusCode::OK, Json(IdeaListResponse::from(list))).into_response(),
        Err(e) => handle_idea_error(e),
    }
}

/// GET /api/ideas/mine - List the caller's own ideas
pub async fn list_my_ideas(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<PageParams>,
) -> Response {
    let query = ListIdeasQuery::owned_by(user.id, params.page, params.per_page);

    match handlers.list_handler.handle(query).await {
        Ok(list) => (StatusCode::OK, Json(IdeaListResponse::from(list))).into_response(),
        Err(e) => handle_idea_error(e),
    }
}

/// GET /api/ideas/:id - Get the full idea document
pub async fn get_idea(State(handlers): State<IdeaHandlers>, Path(idea_id): Path<String>) -> Response {
    let idea_id = match parse_id::<IdeaId>(&idea_id, "idea") {
        Ok(id) => id,
        Err(response) => return response,
    };

    idea_response(handlers.get_handler.handle(GetIdeaQuery { idea_id }).await)
}

/// PATCH /api/ideas/:id - Update idea metadata and polls (owner only)
pub async fn update_idea(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path(idea_id): Path<String>,
    Json(req): Json<UpdateIdeaRequest>,
) -> Response {
    let idea_id = match parse_id::<IdeaId>(&idea_id, "idea") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let patch = match IdeaPatch::try_from(req) {
        Ok(patch) => patch,
        Err(e) => return (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(e))).into_response(),
    };

    let cmd = UpdateIdeaCommand {
        idea_id,
        caller_id: user.id,
        patch,
    };

    idea_response(handlers.update_handler.handle(cmd).await)
}

/// DELETE /api/ideas/:id - Delete an idea (owner only)
pub async fn delete_idea(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path(idea_id): Path<String>,
) -> Response {
    let idea_id = match parse_id::<IdeaId>(&idea_id, "idea") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = DeleteIdeaCommand {
        idea_id,
        caller_id: user.id,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_idea_error(e),
    }
}

/// POST /api/ideas/:id/like
pub async fn like_idea(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path(idea_id): Path<String>,
) -> Response {
    react_to_idea(handlers, user.id, idea_id, Reaction::Like).await
}

/// POST /api/ideas/:id/dislike
pub async fn dislike_idea(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path(idea_id): Path<String>,
) -> Response {
    react_to_idea(handlers, user.id, idea_id, Reaction::Dislike).await
}

async fn react_to_idea(
    handlers: IdeaHandlers,
    user_id: UserId,
    idea_id: String,
    reaction: Reaction,
) -> Response {
    let idea_id = match parse_id::<IdeaId>(&idea_id, "idea") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = ReactToIdeaCommand {
        idea_id,
        user_id,
        reaction,
    };

    idea_response(handlers.react_handler.handle(cmd).await)
}

/// GET /api/ideas/:id/export - Download the idea as a document
pub async fn export_idea(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path(idea_id): Path<String>,
) -> Response {
    let idea_id = match parse_id::<IdeaId>(&idea_id, "idea") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = ExportIdeaQuery {
        idea_id,
        requested_by: user.id,
    };

    match handlers.export_handler.handle(query).await {
        Ok(document) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, document.content_type),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", document.file_name),
                ),
            ],
            document.bytes,
        )
            .into_response(),
        Err(e) => handle_idea_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Poll endpoints
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/ideas/:id/polls - Add a poll (owner only)
pub async fn add_poll(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path(idea_id): Path<String>,
    Json(req): Json<AddPollRequest>,
) -> Response {
    let idea_id = match parse_id::<IdeaId>(&idea_id, "idea") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = AddPollCommand {
        idea_id,
        caller_id: user.id,
        question: req.question,
        options: req.options,
    };

    match handlers.add_poll_handler.handle(cmd).await {
        Ok(result) => (StatusCode::CREATED, Json(AddPollResponse::from(result))).into_response(),
        Err(e) => handle_idea_error(e),
    }
}

/// POST /api/ideas/:id/polls/:poll_id/votes - Vote on a poll option
pub async fn cast_vote(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path((idea_id, poll_id)): Path<(String, String)>,
    Json(req): Json<VoteRequest>,
) -> Response {
    let ids = parse_id::<IdeaId>(&idea_id, "idea").and_then(|idea_id| {
        let poll_id = parse_id::<PollId>(&poll_id, "poll")?;
        let option_id = parse_id::<OptionId>(&req.option_id, "option")?;
        Ok((idea_id, poll_id, option_id))
    });
    let (idea_id, poll_id, option_id) = match ids {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let cmd = CastVoteCommand {
        idea_id,
        poll_id,
        option_id,
        user_id: user.id,
    };

    idea_response(handlers.vote_handler.handle(cmd).await)
}

// ════════════════════════════════════════════════════════════════════════════
// Comment endpoints
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/ideas/:id/comments - Page through comments, newest first
pub async fn list_comments(
    State(handlers): State<IdeaHandlers>,
    Path(idea_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    let idea_id = match parse_id::<IdeaId>(&idea_id, "idea") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = ListCommentsQuery {
        idea_id,
        page: params.page,
        per_page: params.per_page,
    };

    match handlers.list_comments_handler.handle(query).await {
        Ok(page) => (StatusCode::OK, Json(CommentPageResponse::from(page))).into_response(),
        Err(e) => handle_idea_error(e),
    }
}

/// POST /api/ideas/:id/comments - Add a comment
pub async fn add_comment(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path(idea_id): Path<String>,
    Json(req): Json<CommentTextRequest>,
) -> Response {
    let idea_id = match parse_id::<IdeaId>(&idea_id, "idea") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = AddCommentCommand {
        idea_id,
        author: user,
        text: req.text,
    };

    match handlers.add_comment_handler.handle(cmd).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(AddCommentResponse::from(result))).into_response()
        }
        Err(e) => handle_idea_error(e),
    }
}

/// PATCH /api/ideas/:id/comments/:comment_id - Edit a comment (author only)
pub async fn edit_comment(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path((idea_id, comment_id)): Path<(String, String)>,
    Json(req): Json<CommentTextRequest>,
) -> Response {
    let (idea_id, target) = match comment_target(&idea_id, &comment_id, None) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };

    let cmd = EditCommentCommand {
        idea_id,
        target,
        caller_id: user.id,
        text: req.text,
    };

    idea_response(handlers.edit_comment_handler.handle(cmd).await)
}

/// DELETE /api/ideas/:id/comments/:comment_id - Delete a comment (author only)
pub async fn delete_comment(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path((idea_id, comment_id)): Path<(String, String)>,
) -> Response {
    let (idea_id, target) = match comment_target(&idea_id, &comment_id, None) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };

    let cmd = DeleteCommentCommand {
        idea_id,
        target,
        caller_id: user.id,
    };

    idea_response(handlers.delete_comment_handler.handle(cmd).await)
}

/// POST /api/ideas/:id/comments/:comment_id/like
pub async fn like_comment(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path((idea_id, comment_id)): Path<(String, String)>,
) -> Response {
    react_to_comment(handlers, user.id, (idea_id, comment_id, None), Reaction::Like).await
}

/// POST /api/ideas/:id/comments/:comment_id/dislike
pub async fn dislike_comment(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path((idea_id, comment_id)): Path<(String, String)>,
) -> Response {
    react_to_comment(handlers, user.id, (idea_id, comment_id, None), Reaction::Dislike).await
}

// ════════════════════════════════════════════════════════════════════════════
// Reply endpoints
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/ideas/:id/comments/:comment_id/replies - Reply to a comment
pub async fn add_reply(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path((idea_id, comment_id)): Path<(String, String)>,
    Json(req): Json<CommentTextRequest>,
) -> Response {
    let (idea_id, target) = match comment_target(&idea_id, &comment_id, None) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };

    let cmd = AddReplyCommand {
        idea_id,
        comment_id: target.comment_id().clone(),
        author: user,
        text: req.text,
    };

    match handlers.add_reply_handler.handle(cmd).await {
        Ok(result) => (StatusCode::CREATED, Json(AddReplyResponse::from(result))).into_response(),
        Err(e) => handle_idea_error(e),
    }
}

/// PATCH /api/ideas/:id/comments/:comment_id/replies/:reply_id - Edit a reply (author only)
pub async fn edit_reply(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path((idea_id, comment_id, reply_id)): Path<(String, String, String)>,
    Json(req): Json<CommentTextRequest>,
) -> Response {
    let (idea_id, target) = match comment_target(&idea_id, &comment_id, Some(&reply_id)) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };

    let cmd = EditCommentCommand {
        idea_id,
        target,
        caller_id: user.id,
        text: req.text,
    };

    idea_response(handlers.edit_comment_handler.handle(cmd).await)
}

/// DELETE /api/ideas/:id/comments/:comment_id/replies/:reply_id - Delete a reply (author only)
pub async fn delete_reply(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path((idea_id, comment_id, reply_id)): Path<(String, String, String)>,
) -> Response {
    let (idea_id, target) = match comment_target(&idea_id, &comment_id, Some(&reply_id)) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };

    let cmd = DeleteCommentCommand {
        idea_id,
        target,
        caller_id: user.id,
    };

    idea_response(handlers.delete_comment_handler.handle(cmd).await)
}

/// POST /api/ideas/:id/comments/:comment_id/replies/:reply_id/like
pub async fn like_reply(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path((idea_id, comment_id, reply_id)): Path<(String, String, String)>,
) -> Response {
    react_to_comment(
        handlers,
        user.id,
        (idea_id, comment_id, Some(reply_id)),
        Reaction::Like,
    )
    .await
}

/// POST /api/ideas/:id/comments/:comment_id/replies/:reply_id/dislike
pub async fn dislike_reply(
    State(handlers): State<IdeaHandlers>,
    RequireAuth(user): RequireAuth,
    Path((idea_id, comment_id, reply_id)): Path<(String, String, String)>,
) -> Response {
    react_to_comment(
        handlers,
        user.id,
        (idea_id, comment_id, Some(reply_id)),
        Reaction::Dislike,
    )
    .await
}

async fn react_to_comment(
    handlers: IdeaHandlers,
    user_id: UserId,
    (idea_id, comment_id, reply_id): (String, String, Option<String>),
    reaction: Reaction,
) -> Response {
    let (idea_id, target) = match comment_target(&idea_id, &comment_id, reply_id.as_deref()) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };

    let cmd = ReactToCommentCommand {
        idea_id,
        target,
        user_id,
        reaction,
    };

    idea_response(handlers.react_comment_handler.handle(cmd).await)
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_id<T: FromStr>(raw: &str, resource: &str) -> Result<T, Response> {
    raw.parse::<T>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!("Invalid {} ID", resource))),
        )
            .into_response()
    })
}

fn comment_target(
    idea_id: &str,
    comment_id: &str,
    reply_id: Option<&str>,
) -> Result<(IdeaId, CommentTarget), Response> {
    let idea_id = parse_id::<IdeaId>(idea_id, "idea")?;
    let comment_id = parse_id::<CommentId>(comment_id, "comment")?;
    let target = match reply_id {
        None => CommentTarget::Comment(comment_id),
        Some(raw) => CommentTarget::Reply(comment_id, parse_id::<ReplyId>(raw, "reply")?),
    };
    Ok((idea_id, target))
}

fn idea_response(result: Result<Idea, IdeaError>) -> Response {
    match result {
        Ok(idea) => (StatusCode::OK, Json(IdeaResponse::from(&idea))).into_response(),
        Err(e) => handle_idea_error(e),
    }
}

fn handle_idea_error(error: IdeaError) -> Response {
    let code = error.code().to_string();
    let (status, body) = match &error {
        IdeaError::NotFound(_) | IdeaError::ItemNotFound { .. } => {
            (StatusCode::NOT_FOUND, ErrorResponse::new(code, error.message()))
        }
        IdeaError::Forbidden(_) => (StatusCode::FORBIDDEN, ErrorResponse::new(code, error.message())),
        IdeaError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::validation(field, message.clone()),
        ),
        IdeaError::ExportFailed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(code, error.message()),
        ),
        IdeaError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "idea request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::internal("Internal server error"),
            )
        }
    };
    (status, Json(body)).into_response()
}
