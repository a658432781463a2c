//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is what the identity service vouches for: a user
//! id plus whatever naming claims the token carried. The core trusts it
//! without re-verifying credentials.

use super::UserId;
use thiserror::Error;

/// Authenticated caller extracted from a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the identity service.
    pub id: UserId,

    /// Display name if the token carried one.
    pub display_name: Option<String>,

    /// Email address if the token carried one.
    pub email: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, display_name: Option<String>, email: Option<String>) -> Self {
        Self {
            id,
            display_name,
            email,
        }
    }

    /// Name captured on comments and replies.
    ///
    /// Falls back to the email, then to the raw user id.
    pub fn author_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or_else(|| self.id.as_str())
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The identity service could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    #[test]
    fn author_name_prefers_display_name() {
        let user = AuthenticatedUser::new(
            test_user_id(),
            Some("Alice".to_string()),
            Some("alice@example.com".to_string()),
        );
        assert_eq!(user.author_name(), "Alice");
    }

    #[test]
    fn author_name_falls_back_to_email() {
        let user = AuthenticatedUser::new(
            test_user_id(),
            Some("  ".to_string()),
            Some("bob@example.com".to_string()),
        );
        assert_eq!(user.author_name(), "bob@example.com");
    }

    #[test]
    fn author_name_falls_back_to_user_id() {
        let user = AuthenticatedUser::new(test_user_id(), None, None);
        assert_eq!(user.author_name(), "user-123");
    }

    #[test]
    fn auth_error_token_expired_displays_correctly() {
        assert_eq!(format!("{}", AuthError::TokenExpired), "Token expired");
    }

    #[test]
    fn auth_error_is_transient_for_service_errors() {
        assert!(AuthError::service_unavailable("timeout").is_transient());
        assert!(!AuthError::InvalidToken.is_transient());
    }
}
