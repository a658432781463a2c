//! Text field rules shared across the idea aggregate.

use crate::domain::foundation::DomainError;

pub const MAX_IDEA_TEXT_LENGTH: usize = 5000;
pub const MAX_POLL_TEXT_LENGTH: usize = 300;
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// Trims `value` and checks it is non-empty and within `max` characters.
pub(crate) fn required_text(field: &str, value: &str, max: usize) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(
            field,
            format!("{} cannot be empty", field),
        ));
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::validation(
            field,
            format!("{} must be {} characters or less", field, max),
        ));
    }
    Ok(trimmed.to_string())
}

/// Normalises an optional link: blank clears it, anything else must be an
/// absolute http(s) URL.
pub(crate) fn optional_link(value: Option<String>) -> Result<Option<String>, DomainError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !trimmed.contains(char::is_whitespace) => {
            Ok(Some(trimmed.to_string()))
        }
        _ => Err(DomainError::validation(
            "link",
            "link must be an http:// or https:// URL",
        )),
    }
}

/// Checks an optional retention window in days. Any positive day count
/// that fits the stored column is accepted.
pub(crate) fn optional_retention(days: Option<i64>) -> Result<Option<u32>, DomainError> {
    let Some(days) = days else {
        return Ok(None);
    };
    if days < 1 {
        return Err(DomainError::validation(
            "auto_delete_after_days",
            format!("auto_delete_after_days must be a positive number of days, got {}", days),
        ));
    }
    i32::try_from(days)
        .map(|days| Some(days as u32))
        .map_err(|_| {
            DomainError::validation(
                "auto_delete_after_days",
                format!("auto_delete_after_days is too large, got {}", days),
            )
        })
}
