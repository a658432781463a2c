//! Idea module - the aggregate at the centre of Validly.
//!
//! An idea is stored and loaded as one document: metadata, reactions,
//! polls with their vote ledgers, and the comment/reply tree.

mod aggregate;
mod comment;
mod errors;
mod poll;
mod reactions;
mod text;

pub use aggregate::{Idea, IdeaDraft, IdeaPatch};
pub use comment::{Comment, Reply};
pub use errors::IdeaError;
pub use poll::{ensure_poll_ids, OptionDraft, Poll, PollDraft, PollOption, MIN_POLL_OPTIONS};
pub use reactions::{Reaction, Reactions};
pub use text::{MAX_COMMENT_LENGTH, MAX_IDEA_TEXT_LENGTH, MAX_POLL_TEXT_LENGTH};
