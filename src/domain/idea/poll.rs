//! Polls and their vote ledger.
//!
//! A poll is owned by an idea; each option keeps the set of users who chose
//! it. A user's vote lives in at most one option of a poll: casting a vote
//! first removes the user from every option, then adds them to the target.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, OptionId, PollId, UserId};

use super::text::{required_text, MAX_POLL_TEXT_LENGTH};

/// Minimum number of options a poll is created with.
pub const MIN_POLL_OPTIONS: usize = 2;

/// Client-supplied poll definition, before ids are ensured.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollDraft {
    pub poll_id: Option<PollId>,
    pub question: String,
    pub options: Vec<OptionDraft>,
}

/// Client-supplied option definition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionDraft {
    pub option_id: Option<OptionId>,
    pub text: String,
}

impl OptionDraft {
    /// Option with no client id.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            option_id: None,
            text: text.into(),
        }
    }
}

/// A single answer within a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    id: OptionId,
    text: String,
    votes: BTreeSet<UserId>,
}

impl PollOption {
    pub fn id(&self) -> &OptionId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Voters for this option, in id order.
    pub fn votes(&self) -> impl Iterator<Item = &UserId> {
        self.votes.iter()
    }

    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    pub fn has_vote_from(&self, user: &UserId) -> bool {
        self.votes.contains(user)
    }
}

/// A question with at least two options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    id: PollId,
    question: String,
    options: Vec<PollOption>,
}

impl Poll {
    pub fn id(&self) -> &PollId {
        &self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[PollOption] {
        &self.options
    }

    /// Finds an option by id.
    pub fn option(&self, option_id: &OptionId) -> Option<&PollOption> {
        self.options.iter().find(|o| &o.id == option_id)
    }

    /// Total votes across all options.
    pub fn total_votes(&self) -> usize {
        self.options.iter().map(PollOption::vote_count).sum()
    }

    /// Returns the option the user currently votes for, if any.
    pub fn choice_of(&self, user: &UserId) -> Option<&OptionId> {
        self.options
            .iter()
            .find(|o| o.has_vote_from(user))
            .map(|o| &o.id)
    }

    /// Casts `user`'s vote for `option_id`, moving it off any other option.
    ///
    /// Returns true if the ledger changed.
    ///
    /// # Errors
    ///
    /// - `OptionNotFound` if the option is not part of this poll
    pub fn vote(&mut self, option_id: &OptionId, user: &UserId) -> Result<bool, DomainError> {
        if self.option(option_id).is_none() {
            return Err(DomainError::not_found(
                ErrorCode::OptionNotFound,
                "Option",
                option_id,
            ));
        }

        if self.choice_of(user) == Some(option_id) {
            return Ok(false);
        }

        for option in self.options.iter_mut() {
            option.votes.remove(user);
        }
        if let Some(target) = self.options.iter_mut().find(|o| &o.id == option_id) {
            target.votes.insert(user.clone());
        }
        Ok(true)
    }
}

/// Turns drafts into polls, assigning ids where missing.
///
/// This is the single place poll and option ids are ensured, for both
/// creation and wholesale replacement. Votes are carried over from
/// `previous` for every (poll id, option id) pair that survives; they are
/// never taken from client input. Colliding client ids are rejected.
///
/// # Errors
///
/// - `ValidationFailed` for an empty question or option, fewer than two
///   options, or duplicate poll/option ids
pub fn ensure_poll_ids(
    drafts: Vec<PollDraft>,
    previous: &[Poll],
) -> Result<Vec<Poll>, DomainError> {
    let mut taken: HashSet<PollId> = drafts.iter().filter_map(|d| d.poll_id.clone()).collect();
    let supplied = drafts.iter().filter(|d| d.poll_id.is_some()).count();
    if taken.len() != supplied {
        return Err(DomainError::validation("polls", "Duplicate poll id"));
    }

    let mut polls = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let id = match draft.poll_id {
            Some(id) => id,
            None => fresh_poll_id(&mut taken),
        };
        let prior = previous.iter().find(|p| p.id == id);
        polls.push(build_poll(id, draft.question, draft.options, prior)?);
    }
    Ok(polls)
}

/// Builds a brand-new poll with generated ids, avoiding `existing` ids.
pub(crate) fn new_poll(
    question: String,
    options: Vec<String>,
    existing: &[Poll],
) -> Result<Poll, DomainError> {
    let mut taken: HashSet<PollId> = existing.iter().map(|p| p.id.clone()).collect();
    let id = fresh_poll_id(&mut taken);
    let options = options.into_iter().map(OptionDraft::text).collect();
    build_poll(id, question, options, None)
}

fn build_poll(
    id: PollId,
    question: String,
    options: Vec<OptionDraft>,
    prior: Option<&Poll>,
) -> Result<Poll, DomainError> {
    let question = required_text("question", &question, MAX_POLL_TEXT_LENGTH)?;
    if options.len() < MIN_POLL_OPTIONS {
        return Err(DomainError::validation(
            "options",
            format!("A poll needs at least {} options", MIN_POLL_OPTIONS),
        ));
    }

    let mut taken: HashSet<OptionId> = options.iter().filter_map(|o| o.option_id.clone()).collect();
    let supplied = options.iter().filter(|o| o.option_id.is_some()).count();
    if taken.len() != supplied {
        return Err(DomainError::validation("options", "Duplicate option id"));
    }

    let mut built = Vec::with_capacity(options.len());
    for draft in options {
        let text = required_text("option", &draft.text, MAX_POLL_TEXT_LENGTH)?;
        let id = match draft.option_id {
            Some(id) => id,
            None => fresh_option_id(&mut taken),
        };
        let votes = prior
            .and_then(|p| p.option(&id))
            .map(|o| o.votes.clone())
            .unwrap_or_default();
        built.push(PollOption { id, text, votes });
    }

    Ok(Poll {
        id,
        question,
        options: built,
    })
}

fn fresh_poll_id(taken: &mut HashSet<PollId>) -> PollId {
    loop {
        let id = PollId::generate();
        if taken.insert(id.clone()) {
            return id;
        }
    }
}

fn fresh_option_id(taken: &mut HashSet<OptionId>) -> OptionId {
    loop {
        let id = OptionId::generate();
        if taken.insert(id.clone()) {
            return id;
        }
    }
}
