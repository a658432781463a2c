//! Addressing for comment-tree commands.

use crate::domain::foundation::{CommentId, ReplyId};

/// A comment, or a reply inside a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentTarget {
    Comment(CommentId),
    Reply(CommentId, ReplyId),
}

impl CommentTarget {
    pub fn comment_id(&self) -> &CommentId {
        match self {
            CommentTarget::Comment(id) | CommentTarget::Reply(id, _) => id,
        }
    }

    pub fn reply_id(&self) -> Option<&ReplyId> {
        match self {
            CommentTarget::Comment(_) => None,
            CommentTarget::Reply(_, id) => Some(id),
        }
    }
}
