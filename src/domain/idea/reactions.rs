//! Reaction ledger shared by ideas, comments and replies.
//!
//! Each user holds at most one reaction per entity. Storing the ledger as a
//! map from user to reaction makes the like/dislike exclusion structural:
//! there is no representation in which a user is in both sets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{UserId, ValidationError};

/// A user's opinion of an idea, comment or reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reaction {
    /// Returns the opposing reaction.
    pub fn opposite(&self) -> Reaction {
        match self {
            Reaction::Like => Reaction::Dislike,
            Reaction::Dislike => Reaction::Like,
        }
    }
}

impl std::str::FromStr for Reaction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Reaction::Like),
            "dislike" => Ok(Reaction::Dislike),
            other => Err(ValidationError::invalid_format(
                "reaction",
                format!("'{}' is not like or dislike", other),
            )),
        }
    }
}

/// Likes and dislikes for a single entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reactions(BTreeMap<UserId, Reaction>);

impl Reactions {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `reaction` for `user`, replacing the opposite one.
    ///
    /// Not a toggle: reacting the same way twice leaves the user in place.
    /// Returns true if the ledger changed.
    pub fn react(&mut self, user: &UserId, reaction: Reaction) -> bool {
        match self.0.insert(user.clone(), reaction) {
            Some(previous) => previous != reaction,
            None => true,
        }
    }

    /// Returns the reaction currently held by `user`.
    pub fn reaction_of(&self, user: &UserId) -> Option<Reaction> {
        self.0.get(user).copied()
    }

    /// Users who liked, in id order.
    pub fn likes(&self) -> impl Iterator<Item = &UserId> {
        self.users_with(Reaction::Like)
    }

    /// Users who disliked, in id order.
    pub fn dislikes(&self) -> impl Iterator<Item = &UserId> {
        self.users_with(Reaction::Dislike)
    }

    pub fn like_count(&self) -> usize {
        self.likes().count()
    }

    pub fn dislike_count(&self) -> usize {
        self.dislikes().count()
    }

    fn users_with(&self, reaction: Reaction) -> impl Iterator<Item = &UserId> {
        self.0
            .iter()
            .filter(move |(_, held)| **held == reaction)
            .map(|(user, _)| user)
    }
}
