//! Idea-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, IdeaId};

/// Errors returned by idea command and query handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdeaError {
    /// The idea does not exist.
    NotFound(IdeaId),
    /// A poll, option, comment or reply inside the idea does not exist.
    ItemNotFound { code: ErrorCode, message: String },
    /// Caller is not the owner or author.
    Forbidden(String),
    /// Input failed validation.
    ValidationFailed { field: String, message: String },
    /// The export renderer failed.
    ExportFailed(String),
    /// Storage or another collaborator failed.
    Infrastructure(String),
}

impl IdeaError {
    pub fn not_found(id: IdeaId) -> Self {
        IdeaError::NotFound(id)
    }
    pub fn forbidden(message: impl Into<String>) -> Self {
        IdeaError::Forbidden(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        IdeaError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        IdeaError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            IdeaError::NotFound(_) => ErrorCode::IdeaNotFound,
            IdeaError::ItemNotFound { code, .. } => *code,
            IdeaError::Forbidden(_) => ErrorCode::Forbidden,
            IdeaError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            IdeaError::ExportFailed(_) => ErrorCode::ExportFailed,
            IdeaError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            IdeaError::NotFound(id) => format!("Idea not found: {}", id),
            IdeaError::ItemNotFound { message, .. } => message.clone(),
            IdeaError::Forbidden(msg) => msg.clone(),
            IdeaError::ValidationFailed { message, .. } => message.clone(),
            IdeaError::ExportFailed(msg) => format!("Export failed: {}", msg),
            IdeaError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for IdeaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for IdeaError {}

impl From<DomainError> for IdeaError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => IdeaError::ValidationFailed {
                field: err.detail("field").unwrap_or("input").to_string(),
                message: err.message,
            },
            ErrorCode::IdeaNotFound => match err.detail("id").and_then(|id| id.parse().ok()) {
                Some(id) => IdeaError::NotFound(id),
                None => IdeaError::ItemNotFound {
                    code: err.code,
                    message: err.message,
                },
            },
            code if code.is_not_found() => IdeaError::ItemNotFound {
                code,
                message: err.message,
            },
            ErrorCode::Forbidden | ErrorCode::Unauthorized => IdeaError::Forbidden(err.message),
            ErrorCode::ExportFailed => IdeaError::ExportFailed(err.message),
            _ => IdeaError::Infrastructure(err.message),
        }
    }
}
