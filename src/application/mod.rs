//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).
//! The auto-delete sweeper runs alongside request handling on its own task.

pub mod handlers;
pub mod sweeper;

pub use handlers::idea::{
    AddCommentCommand, AddCommentHandler, AddCommentResult, AddPollCommand, AddPollHandler,
    AddPollResult, AddReplyCommand, AddReplyHandler, AddReplyResult, CastVoteCommand, CastVoteHandler, CommentPage, CommentTarget,
    CreateIdeaCommand, CreateIdeaHandler, DeleteCommentCommand, DeleteCommentHandler,
    DeleteIdeaCommand, DeleteIdeaHandler, EditCommentCommand, EditCommentHandler,
    ExportIdeaHandler, ExportIdeaQuery, GetIdeaHandler, GetIdeaQuery, ListCommentsHandler,
    ListCommentsQuery, ListIdeasHandler, ListIdeasQuery, ReactToCommentCommand,
    ReactToCommentHandler, ReactToIdeaCommand, ReactToIdeaHandler, UpdateIdeaCommand,
    UpdateIdeaHandler,
};
pub use sweeper::{AutoDeleteSweeper, SweepReport, SweeperConfig};
