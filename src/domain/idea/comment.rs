//! Comment/reply tree nested inside an idea.
//!
//! Comments are stored newest-first; replies within a comment are stored in
//! the order they were written. Authors are denormalised at creation time.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommentId, DomainError, ErrorCode, ReplyId, Timestamp, UserId};

use super::reactions::{Reaction, Reactions};
use super::text::{required_text, MAX_COMMENT_LENGTH};

/// A reply to a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    id: ReplyId,
    author_id: UserId,
    author_name: String,
    text: String,
    reactions: Reactions,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Reply {
    pub fn id(&self) -> &ReplyId {
        &self.id
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn reactions(&self) -> &Reactions {
        &self.reactions
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    fn authorize_author(&self, caller: &UserId) -> Result<(), DomainError> {
        if &self.author_id == caller {
            Ok(())
        } else {
            Err(DomainError::forbidden(
                "Only the author can change this reply",
            ))
        }
    }
}

/// A top-level comment on an idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    author_id: UserId,
    author_name: String,
    text: String,
    reactions: Reactions,
    replies: Vec<Reply>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Comment {
    /// Creates a comment with a validated body.
    pub(crate) fn new(
        id: CommentId,
        author_id: UserId,
        author_name: &str,
        text: &str,
    ) -> Result<Self, DomainError> {
        let text = required_text("text", text, MAX_COMMENT_LENGTH)?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            author_id,
            author_name: author_name.trim().to_string(),
            text,
            reactions: Reactions::new(),
            replies: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &CommentId {
        &self.id
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn reactions(&self) -> &Reactions {
        &self.reactions
    }

    /// Replies in the order they were written.
    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    pub fn reply(&self, reply_id: &ReplyId) -> Option<&Reply> {
        self.replies.iter().find(|r| &r.id == reply_id)
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates that `caller` wrote this comment.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if caller is not the author
    pub fn authorize_author(&self, caller: &UserId) -> Result<(), DomainError> {
        if &self.author_id == caller {
            Ok(())
        } else {
            Err(DomainError::forbidden(
                "Only the author can change this comment",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn edit(&mut self, caller: &UserId, text: &str) -> Result<(), DomainError> {
        self.authorize_author(caller)?;
        let text = required_text("text", text, MAX_COMMENT_LENGTH)?;
        self.text = text;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub(crate) fn react(&mut self, user: &UserId, reaction: Reaction) -> bool {
        self.reactions.react(user, reaction)
    }

    /// Appends a reply and returns its id.
    pub(crate) fn add_reply(
        &mut self,
        author_id: UserId,
        author_name: &str,
        text: &str,
    ) -> Result<ReplyId, DomainError> {
        let text = required_text("text", text, MAX_COMMENT_LENGTH)?;
        let id = loop {
            let candidate = ReplyId::generate();
            if self.reply(&candidate).is_none() {
                break candidate;
            }
        };

        let now = Timestamp::now();
        self.replies.push(Reply {
            id: id.clone(),
            author_id,
            author_name: author_name.trim().to_string(),
            text,
            reactions: Reactions::new(),
            created_at: now,
            updated_at: now,
        });
        self.updated_at = now;
        Ok(id)
    }

    pub(crate) fn edit_reply(
        &mut self,
        reply_id: &ReplyId,
        caller: &UserId,
        text: &str,
    ) -> Result<(), DomainError> {
        let reply = self.reply_mut(reply_id)?;
        reply.authorize_author(caller)?;
        let text = required_text("text", text, MAX_COMMENT_LENGTH)?;
        reply.text = text;
        reply.updated_at = Timestamp::now();
        Ok(())
    }

    pub(crate) fn remove_reply(
        &mut self,
        reply_id: &ReplyId,
        caller: &UserId,
    ) -> Result<(), DomainError> {
        let position = self
            .replies
            .iter()
            .position(|r| &r.id == reply_id)
            .ok_or_else(|| reply_not_found(reply_id))?;
        self.replies[position].authorize_author(caller)?;
        self.replies.remove(position);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub(crate) fn react_to_reply(
        &mut self,
        reply_id: &ReplyId,
        user: &UserId,
        reaction: Reaction,
    ) -> Result<bool, DomainError> {
        Ok(self.reply_mut(reply_id)?.reactions.react(user, reaction))
    }

    fn reply_mut(&mut self, reply_id: &ReplyId) -> Result<&mut Reply, DomainError> {
        self.replies
            .iter_mut()
            .find(|r| &r.id == reply_id)
            .ok_or_else(|| reply_not_found(reply_id))
    }
}

fn reply_not_found(reply_id: &ReplyId) -> DomainError {
    DomainError::not_found(ErrorCode::ReplyNotFound, "Reply", reply_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn comment() -> Comment {
        Comment::new(CommentId::generate(), user("author"), "Author", "Nice idea").unwrap()
    }

    #[test]
    fn new_comment_starts_empty() {
        let c = comment();
        assert_eq!(c.text(), "Nice idea");
        assert!(c.replies().is_empty());
        assert_eq!(c.reactions().like_count(), 0);
    }

    #[test]
    fn empty_comment_is_rejected() {
        let err = Comment::new(CommentId::generate(), user("a"), "A", "  ").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn only_author_can_edit() {
        let mut c = comment();
        let err = c.edit(&user("intruder"), "Hijacked").unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(c.text(), "Nice idea");

        c.edit(&user("author"), "Great idea").unwrap();
        assert_eq!(c.text(), "Great idea");
    }

    #[test]
    fn replies_are_appended_in_order() {
        let mut c = comment();
        let first = c.add_reply(user("r1"), "R1", "first").unwrap();
        let second = c.add_reply(user("r2"), "R2", "second").unwrap();

        let ids: Vec<_> = c.replies().iter().map(|r| r.id().clone()).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn reply_edit_checks_reply_author_not_comment_author() {
        let mut c = comment();
        let reply_id = c.add_reply(user("replier"), "Replier", "hello").unwrap();

        let err = c.edit_reply(&reply_id, &user("author"), "changed").unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        c.edit_reply(&reply_id, &user("replier"), "changed").unwrap();
        assert_eq!(c.reply(&reply_id).unwrap().text(), "changed");
    }

    #[test]
    fn removing_missing_reply_is_not_found() {
        let mut c = comment();
        let err = c.remove_reply(&ReplyId::generate(), &user("author")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReplyNotFound);
    }

    #[test]
    fn stranger_cannot_remove_reply() {
        let mut c = comment();
        let reply_id = c.add_reply(user("replier"), "Replier", "hello").unwrap();
        assert!(c.remove_reply(&reply_id, &user("stranger")).is_err());
        assert_eq!(c.replies().len(), 1);
    }

    #[test]
    fn reply_reactions_are_exclusive() {
        let mut c = comment();
        let reply_id = c.add_reply(user("replier"), "Replier", "hello").unwrap();
        c.react_to_reply(&reply_id, &user("fan"), Reaction::Like).unwrap();
        c.react_to_reply(&reply_id, &user("fan"), Reaction::Dislike).unwrap();

        let reactions = c.reply(&reply_id).unwrap().reactions();
        assert_eq!(reactions.like_count(), 0);
        assert_eq!(reactions.dislike_count(), 1);
    }
}
