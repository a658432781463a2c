//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Validly domain.

mod auth;
mod errors;
mod ids;
mod stage;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CommentId, IdeaId, OptionId, PollId, ReplyId, UserId};
pub use stage::Stage;
pub use timestamp::Timestamp;
