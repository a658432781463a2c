//! Strongly-typed identifier value objects.
//!
//! `IdeaId` is a UUID assigned by the server. Identifiers of entities nested
//! inside an idea (polls, options, comments, replies) are opaque strings:
//! clients may supply them when submitting polls, and they only need to be
//! unique within their parent scope.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for an idea aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdeaId(Uuid);

impl IdeaId {
    /// Creates a new random IdeaId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an IdeaId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for IdeaId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IdeaId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// User identifier (supplied by the identity service).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declares an opaque string identifier scoped to a parent entity.
///
/// Generated values are UUID v4 strings, but any non-empty string is
/// accepted when parsing client input.
macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Wraps an existing identifier, rejecting blank values.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(id))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a poll, unique within its idea.
    PollId,
    "poll_id"
);

opaque_id!(
    /// Identifier of a poll option, unique within its poll.
    OptionId,
    "option_id"
);

opaque_id!(
    /// Identifier of a comment, unique within its idea.
    CommentId,
    "comment_id"
);

opaque_id!(
    /// Identifier of a reply, unique within its comment.
    ReplyId,
    "reply_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idea_id_generates_unique_values() {
        let id1 = IdeaId::new();
        let id2 = IdeaId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn idea_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: IdeaId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn idea_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<IdeaId>().is_err());
    }

    #[test]
    fn user_id_rejects_empty() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn user_id_serializes_as_plain_string() {
        let id = UserId::new("user-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"user-1\"");
    }

    #[test]
    fn generated_poll_ids_are_distinct() {
        assert_ne!(PollId::generate(), PollId::generate());
    }

    #[test]
    fn opaque_ids_accept_client_values() {
        let id: OptionId = "yes".parse().unwrap();
        assert_eq!(id.as_str(), "yes");
    }

    #[test]
    fn opaque_ids_reject_blank_values() {
        let err = CommentId::new(" ").unwrap_err();
        assert_eq!(err.to_string(), "Field 'comment_id' cannot be empty");
    }

    #[test]
    fn reply_id_roundtrips_through_json() {
        let id = ReplyId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let back: ReplyId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
