//! Idea aggregate root.
//!
//! An idea owns its polls and its comment tree; every mutation goes through
//! this type and is checked (validation, authorization, existence of the
//! addressed sub-entity) before any state changes, so a failed operation
//! never leaves a partial write behind.
//!
//! # Ownership
//!
//! Only the owner edits metadata, replaces or adds polls, and deletes the
//! idea. Any authenticated user may react, vote, comment and reply; only a
//! comment's or reply's author may edit or delete it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CommentId, DomainError, ErrorCode, IdeaId, OptionId, PollId, ReplyId, Stage, Timestamp,
    UserId,
};

use super::comment::Comment;
use super::poll::{ensure_poll_ids, new_poll, Poll, PollDraft};
use super::reactions::{Reaction, Reactions};
use super::text::{
    optional_link, optional_retention, required_text, MAX_IDEA_TEXT_LENGTH,
};

/// Input for creating an idea, as received from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaDraft {
    pub problem: String,
    pub solution: String,
    /// Stage label; `None` means the caller omitted it.
    pub stage: Option<String>,
    pub link: Option<String>,
    pub auto_delete_after_days: Option<i64>,
    pub polls: Vec<PollDraft>,
}

/// Owner edits to an idea. `None` leaves a field unchanged.
///
/// `link` and `auto_delete_after_days` are doubly optional so a caller can
/// clear them (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaPatch {
    pub problem: Option<String>,
    pub solution: Option<String>,
    pub stage: Option<String>,
    pub link: Option<Option<String>>,
    pub auto_delete_after_days: Option<Option<i64>>,
    pub polls: Option<Vec<PollDraft>>,
}

impl IdeaPatch {
    /// Returns true if the patch names no field.
    pub fn is_empty(&self) -> bool {
        self == &IdeaPatch::default()
    }
}

/// Idea aggregate - a startup idea under validation.
///
/// # Invariants
///
/// - poll ids are unique within the idea, option ids within their poll,
///   comment ids within the idea, reply ids within their comment
/// - a user holds at most one reaction per idea/comment/reply
/// - a user votes for at most one option per poll
/// - `stage` is always a valid `Stage`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    id: IdeaId,
    owner_id: UserId,
    problem: String,
    solution: String,
    stage: Stage,
    link: Option<String>,
    auto_delete_after_days: Option<u32>,
    reactions: Reactions,
    polls: Vec<Poll>,
    /// Newest first.
    comments: Vec<Comment>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Idea {
    /// Create a new idea owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if problem/solution/stage is missing, the stage
    ///   is unknown, the link or retention window is invalid, or a poll is
    ///   malformed
    pub fn create(id: IdeaId, owner_id: UserId, draft: IdeaDraft) -> Result<Self, DomainError> {
        let problem = required_text("problem", &draft.problem, MAX_IDEA_TEXT_LENGTH)?;
        let solution = required_text("solution", &draft.solution, MAX_IDEA_TEXT_LENGTH)?;
        let stage = match draft.stage {
            Some(label) if !label.trim().is_empty() => label.parse::<Stage>()?,
            _ => return Err(DomainError::validation("stage", "stage is required")),
        };
        let link = optional_link(draft.link)?;
        let auto_delete_after_days = optional_retention(draft.auto_delete_after_days)?;
        let polls = ensure_poll_ids(draft.polls, &[])?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            owner_id,
            problem,
            solution,
            stage,
            link,
            auto_delete_after_days,
            reactions: Reactions::new(),
            polls,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &IdeaId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn problem(&self) -> &str {
        &self.problem
    }

    pub fn solution(&self) -> &str {
        &self.solution
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn auto_delete_after_days(&self) -> Option<u32> {
        self.auto_delete_after_days
    }

    pub fn reactions(&self) -> &Reactions {
        &self.reactions
    }

    pub fn polls(&self) -> &[Poll] {
        &self.polls
    }

    pub fn poll(&self, poll_id: &PollId) -> Option<&Poll> {
        self.polls.iter().find(|p| p.id() == poll_id)
    }

    /// Comments, newest first.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comment(&self, comment_id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id() == comment_id)
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

    /// Checks if the given user owns this idea.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Validates that the user may change or delete this idea.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if user is not the owner
    pub fn authorize_owner(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::forbidden(
                "Only the owner can modify this idea",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Owner mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply whitelisted owner edits.
    ///
    /// Every field is validated before any is assigned. Replacing `polls`
    /// goes through the same id-ensuring step as creation.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if caller is not the owner
    /// - `ValidationFailed` for any invalid field
    pub fn update(&mut self, caller: &UserId, patch: IdeaPatch) -> Result<(), DomainError> {
        self.authorize_owner(caller)?;

        let problem = patch
            .problem
            .map(|p| required_text("problem", &p, MAX_IDEA_TEXT_LENGTH))
            .transpose()?;
        let solution = patch
            .solution
            .map(|s| required_text("solution", &s, MAX_IDEA_TEXT_LENGTH))
            .transpose()?;
        let stage = patch.stage.map(|s| s.parse::<Stage>()).transpose()?;
        let link = patch.link.map(optional_link).transpose()?;
        let retention = patch
            .auto_delete_after_days
            .map(optional_retention)
            .transpose()?;
        let polls = patch
            .polls
            .map(|drafts| ensure_poll_ids(drafts, &self.polls))
            .transpose()?;

        if let Some(problem) = problem {
            self.problem = problem;
        }
        if let Some(solution) = solution {
            self.solution = solution;
        }
        if let Some(stage) = stage {
            self.stage = stage;
        }
        if let Some(link) = link {
            self.link = link;
        }
        if let Some(retention) = retention {
            self.auto_delete_after_days = retention;
        }
        if let Some(polls) = polls {
            self.polls = polls;
        }
        self.touch();
        Ok(())
    }

    /// Append a new poll with generated ids.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if caller is not the owner
    /// - `ValidationFailed` if the question is empty or fewer than two
    ///   options are given
    pub fn add_poll(
        &mut self,
        caller: &UserId,
        question: String,
        options: Vec<String>,
    ) -> Result<PollId, DomainError> {
        self.authorize_owner(caller)?;
        let poll = new_poll(question, options, &self.polls)?;
        let id = poll.id().clone();
        self.polls.push(poll);
        self.touch();
        Ok(id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Community mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Record a like or dislike on the idea itself.
    ///
    /// Returns true if anything changed; repeating a reaction is a no-op.
    pub fn react(&mut self, user: &UserId, reaction: Reaction) -> bool {
        let changed = self.reactions.react(user, reaction);
        if changed {
            self.touch();
        }
        changed
    }

    pub fn like(&mut self, user: &UserId) -> bool {
        self.react(user, Reaction::Like)
    }

    pub fn dislike(&mut self, user: &UserId) -> bool {
        self.react(user, Reaction::Dislike)
    }

    /// Vote for an option, moving any earlier vote in the same poll.
    ///
    /// # Errors
    ///
    /// - `PollNotFound` / `OptionNotFound` if the target does not exist
    pub fn vote(
        &mut self,
        poll_id: &PollId,
        option_id: &OptionId,
        user: &UserId,
    ) -> Result<bool, DomainError> {
        let poll = self
            .polls
            .iter_mut()
            .find(|p| p.id() == poll_id)
            .ok_or_else(|| DomainError::not_found(ErrorCode::PollNotFound, "Poll", poll_id))?;
        let changed = poll.vote(option_id, user)?;
        if changed {
            self.touch();
        }
        Ok(changed)
    }

    /// Add a comment at the front of the list.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if text is empty
    pub fn add_comment(
        &mut self,
        author_id: UserId,
        author_name: &str,
        text: &str,
    ) -> Result<CommentId, DomainError> {
        let id = loop {
            let candidate = CommentId::generate();
            if self.comment(&candidate).is_none() {
                break candidate;
            }
        };
        let comment = Comment::new(id.clone(), author_id, author_name, text)?;
        self.comments.insert(0, comment);
        self.touch();
        Ok(id)
    }

    /// # Errors
    ///
    /// - `CommentNotFound`, `Forbidden` (not the author), `ValidationFailed`
    pub fn edit_comment(
        &mut self,
        comment_id: &CommentId,
        caller: &UserId,
        text: &str,
    ) -> Result<(), DomainError> {
        self.comment_mut(comment_id)?.edit(caller, text)?;
        self.touch();
        Ok(())
    }

    /// Remove a comment together with its replies.
    ///
    /// # Errors
    ///
    /// - `CommentNotFound`, `Forbidden` (not the author)
    pub fn delete_comment(
        &mut self,
        comment_id: &CommentId,
        caller: &UserId,
    ) -> Result<(), DomainError> {
        let position = self
            .comments
            .iter()
            .position(|c| c.id() == comment_id)
            .ok_or_else(|| comment_not_found(comment_id))?;
        self.comments[position].authorize_author(caller)?;
        self.comments.remove(position);
        self.touch();
        Ok(())
    }

    pub fn react_to_comment(
        &mut self,
        comment_id: &CommentId,
        user: &UserId,
        reaction: Reaction,
    ) -> Result<bool, DomainError> {
        let changed = self.comment_mut(comment_id)?.react(user, reaction);
        if changed {
            self.touch();
        }
        Ok(changed)
    }

    /// Append a reply to a comment.
    ///
    /// # Errors
    ///
    /// - `CommentNotFound`, `ValidationFailed`
    pub fn add_reply(
        &mut self,
        comment_id: &CommentId,
        author_id: UserId,
        author_name: &str,
        text: &str,
    ) -> Result<ReplyId, DomainError> {
        let id = self
            .comment_mut(comment_id)?
            .add_reply(author_id, author_name, text)?;
        self.touch();
        Ok(id)
    }

    pub fn edit_reply(
        &mut self,
        comment_id: &CommentId,
        reply_id: &ReplyId,
        caller: &UserId,
        text: &str,
    ) -> Result<(), DomainError> {
        self.comment_mut(comment_id)?
            .edit_reply(reply_id, caller, text)?;
        self.touch();
        Ok(())
    }

    pub fn delete_reply(
        &mut self,
        comment_id: &CommentId,
        reply_id: &ReplyId,
        caller: &UserId,
    ) -> Result<(), DomainError> {
        self.comment_mut(comment_id)?
            .remove_reply(reply_id, caller)?;
        self.touch();
        Ok(())
    }

    pub fn react_to_reply(
        &mut self,
        comment_id: &CommentId,
        reply_id: &ReplyId,
        user: &UserId,
        reaction: Reaction,
    ) -> Result<bool, DomainError> {
        let changed = self
            .comment_mut(comment_id)?
            .react_to_reply(reply_id, user, reaction)?;
        if changed {
            self.touch();
        }
        Ok(changed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Retention
    // ─────────────────────────────────────────────────────────────────────────

    /// True once `now` is at least `auto_delete_after_days` whole days past
    /// creation. Ideas without a retention window never expire.
    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        match self.auto_delete_after_days {
            Some(days) => now.whole_days_since(&self.created_at) >= i64::from(days),
            None => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn comment_mut(&mut self, comment_id: &CommentId) -> Result<&mut Comment, DomainError> {
        self.comments
            .iter_mut()
            .find(|c| c.id() == comment_id)
            .ok_or_else(|| comment_not_found(comment_id))
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

fn comment_not_found(comment_id: &CommentId) -> DomainError {
    DomainError::not_found(ErrorCode::CommentNotFound, "Comment", comment_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::idea::OptionDraft;

    fn owner() -> UserId {
        UserId::new("owner").unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn draft() -> IdeaDraft {
        IdeaDraft {
            problem: "X".to_string(),
            solution: "Y".to_string(),
            stage: Some("Concept".to_string()),
            ..Default::default()
        }
    }

    fn test_idea() -> Idea {
        Idea::create(IdeaId::new(), owner(), draft()).unwrap()
    }

    fn idea_with_poll() -> (Idea, PollId, OptionId, OptionId) {
        let mut idea = test_idea();
        let poll_id = idea
            .add_poll(&owner(), "Useful?".to_string(), vec!["Yes".into(), "No".into()])
            .unwrap();
        let poll = idea.poll(&poll_id).unwrap();
        let yes = poll.options()[0].id().clone();
        let no = poll.options()[1].id().clone();
        (idea, poll_id, yes, no)
    }

    // Construction tests

    #[test]
    fn new_idea_starts_empty() {
        let idea = test_idea();
        assert_eq!(idea.problem(), "X");
        assert_eq!(idea.solution(), "Y");
        assert_eq!(idea.stage(), Stage::Concept);
        assert_eq!(idea.reactions().like_count(), 0);
        assert!(idea.polls().is_empty());
        assert!(idea.comments().is_empty());
    }

    #[test]
    fn create_rejects_invalid_stage() {
        let result = Idea::create(
            IdeaId::new(),
            owner(),
            IdeaDraft {
                stage: Some("Invalid".to_string()),
                ..draft()
            },
        );
        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.detail("field"), Some("stage"));
    }

    #[test]
    fn create_rejects_missing_stage() {
        let result = Idea::create(IdeaId::new(), owner(), IdeaDraft { stage: None, ..draft() });
        assert!(result.is_err());
    }

    #[test]
    fn create_rejects_empty_problem() {
        let result = Idea::create(
            IdeaId::new(),
            owner(),
            IdeaDraft {
                problem: "  ".to_string(),
                ..draft()
            },
        );
        assert_eq!(result.unwrap_err().detail("field"), Some("problem"));
    }

    #[test]
    fn create_assigns_missing_poll_ids() {
        let idea = Idea::create(
            IdeaId::new(),
            owner(),
            IdeaDraft {
                polls: vec![PollDraft {
                    poll_id: None,
                    question: "Q?".to_string(),
                    options: vec![OptionDraft::text("A"), OptionDraft::text("B")],
                }],
                ..draft()
            },
        )
        .unwrap();
        assert_eq!(idea.polls().len(), 1);
        assert_eq!(idea.polls()[0].options().len(), 2);
    }

    // Update tests

    #[test]
    fn empty_patch_only_refreshes_updated_at() {
        let idea = test_idea();
        let mut updated = idea.clone();
        updated.update(&owner(), IdeaPatch::default()).unwrap();

        assert!(updated.updated_at() >= idea.updated_at());
        updated.updated_at = idea.updated_at;
        assert_eq!(updated, idea);
    }

    #[test]
    fn update_by_non_owner_is_forbidden_and_changes_nothing() {
        let mut idea = test_idea();
        let snapshot = idea.clone();
        let err = idea
            .update(
                &user("intruder"),
                IdeaPatch {
                    problem: Some("Hijacked".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(idea, snapshot);
    }

    #[test]
    fn update_is_all_or_nothing() {
        let mut idea = test_idea();
        let snapshot = idea.clone();
        let result = idea.update(
            &owner(),
            IdeaPatch {
                problem: Some("New problem".to_string()),
                stage: Some("Seed".to_string()),
                ..Default::default()
            },
        );
        assert!(result.is_err());
        assert_eq!(idea, snapshot);
    }

    #[test]
    fn update_can_clear_link_and_retention() {
        let mut idea = Idea::create(
            IdeaId::new(),
            owner(),
            IdeaDraft {
                link: Some("https://example.com".to_string()),
                auto_delete_after_days: Some(3),
                ..draft()
            },
        )
        .unwrap();
        idea.update(
            &owner(),
            IdeaPatch {
                link: Some(None),
                auto_delete_after_days: Some(None),
                stage: Some("MVP".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(idea.link(), None);
        assert_eq!(idea.auto_delete_after_days(), None);
        assert_eq!(idea.stage(), Stage::Mvp);
    }

    // Poll tests

    #[test]
    fn add_poll_requires_owner() {
        let mut idea = test_idea();
        let err = idea
            .add_poll(&user("b"), "Q?".to_string(), vec!["A".into(), "B".into()])
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert!(idea.polls().is_empty());
    }

    #[test]
    fn vote_yes_then_no_leaves_only_no() {
        let (mut idea, poll_id, yes, no) = idea_with_poll();
        idea.vote(&poll_id, &yes, &user("a")).unwrap();
        idea.vote(&poll_id, &no, &user("a")).unwrap();

        let poll = idea.poll(&poll_id).unwrap();
        assert!(!poll.option(&yes).unwrap().has_vote_from(&user("a")));
        assert!(poll.option(&no).unwrap().has_vote_from(&user("a")));
    }

    #[test]
    fn vote_on_missing_poll_is_not_found() {
        let (mut idea, _, yes, _) = idea_with_poll();
        let err = idea
            .vote(&PollId::generate(), &yes, &user("a"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PollNotFound);
    }

    // Reaction tests

    #[test]
    fn like_is_idempotent() {
        let mut idea = test_idea();
        idea.like(&user("a"));
        let once = idea.clone();
        assert!(!idea.like(&user("a")));
        assert_eq!(idea, once);
    }

    #[test]
    fn dislike_replaces_like() {
        let mut idea = test_idea();
        idea.like(&user("a"));
        idea.dislike(&user("a"));
        assert_eq!(idea.reactions().like_count(), 0);
        assert_eq!(idea.reactions().dislike_count(), 1);
    }

    // Comment tests

    #[test]
    fn comments_are_newest_first() {
        let mut idea = test_idea();
        let first = idea.add_comment(user("a"), "A", "first").unwrap();
        let second = idea.add_comment(user("b"), "B", "second").unwrap();
        assert_eq!(idea.comments()[0].id(), &second);
        assert_eq!(idea.comments()[1].id(), &first);
    }

    #[test]
    fn edit_comment_by_stranger_is_forbidden() {
        let mut idea = test_idea();
        let id = idea.add_comment(user("a"), "A", "Nice idea").unwrap();
        let err = idea.edit_comment(&id, &user("b"), "Bad idea").unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(idea.comment(&id).unwrap().text(), "Nice idea");
    }

    #[test]
    fn deleting_comment_drops_replies() {
        let mut idea = test_idea();
        let id = idea.add_comment(user("a"), "A", "Nice idea").unwrap();
        idea.add_reply(&id, user("b"), "B", "agreed").unwrap();
        idea.delete_comment(&id, &user("a")).unwrap();
        assert!(idea.comments().is_empty());
    }

    #[test]
    fn reply_on_missing_comment_is_not_found() {
        let mut idea = test_idea();
        let err = idea
            .add_reply(&CommentId::generate(), user("b"), "B", "hello")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CommentNotFound);
    }

    #[test]
    fn react_to_reply_on_missing_reply_is_not_found() {
        let mut idea = test_idea();
        let id = idea.add_comment(user("a"), "A", "Nice idea").unwrap();
        let err = idea
            .react_to_reply(&id, &ReplyId::generate(), &user("b"), Reaction::Like)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ReplyNotFound);
    }

    // Retention tests

    #[test]
    fn expiry_follows_whole_days() {
        let idea = Idea::create(
            IdeaId::new(),
            owner(),
            IdeaDraft {
                auto_delete_after_days: Some(1),
                ..draft()
            },
        )
        .unwrap();
        assert!(!idea.is_expired_at(idea.created_at()));
        assert!(idea.is_expired_at(&idea.created_at().add_days(2)));
    }

    #[test]
    fn ideas_without_retention_never_expire() {
        let idea = test_idea();
        assert!(!idea.is_expired_at(&idea.created_at().add_days(10_000)));
    }

    #[test]
    fn serde_roundtrip_preserves_tree() {
        let (mut idea, poll_id, yes, _) = idea_with_poll();
        idea.vote(&poll_id, &yes, &user("a")).unwrap();
        let comment = idea.add_comment(user("a"), "A", "hello").unwrap();
        idea.add_reply(&comment, user("b"), "B", "hi").unwrap();

        let json = serde_json::to_value(&idea).unwrap();
        let back: Idea = serde_json::from_value(json).unwrap();
        assert_eq!(back, idea);
    }
}
