//! Task text validation.
//!
//! Pure, total, deterministic checks applied before any text enters the
//! task collection. Rules are checked in order and the first failing rule
//! wins; validation never mutates its input (callers trim before storing).

use thiserror::Error;

/// Maximum length allowed for task text, in UTF-16 code units.
///
/// Measured on the untrimmed input: text of exactly this length padded with
/// surrounding whitespace is rejected even though the trimmed result would
/// fit.
pub const MAX_TASK_LENGTH: usize = 200;

/// Why a piece of task text was rejected.
///
/// Returned synchronously from Add/Edit; the presentation layer is expected
/// to show the message and re-prompt. The messages are the user-facing
/// strings.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Zero-length text
    #[error("Task text cannot be empty")]
    Empty,

    /// Non-empty text that trims to nothing
    #[error("Task text cannot be only whitespace")]
    WhitespaceOnly,

    /// Untrimmed text longer than [`MAX_TASK_LENGTH`]
    #[error("Task text cannot exceed {MAX_TASK_LENGTH} characters")]
    MaxLengthExceeded,
}

/// Length of `text` for validation purposes: UTF-16 code units.
///
/// This is an explicit contract, not an implementation detail: an emoji
/// such as 😀 counts as two units rather than one character, and persisted
/// snapshots from other runtimes measured the same way stay valid here.
#[must_use]
pub fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Validate task text.
///
/// Rules, first failure wins:
/// 1. empty → [`ValidationError::Empty`]
/// 2. whitespace-only → [`ValidationError::WhitespaceOnly`]
/// 3. longer than [`MAX_TASK_LENGTH`] (untrimmed) →
///    [`ValidationError::MaxLengthExceeded`]
///
/// # Errors
///
/// Returns the first failing rule's error; `Ok(())` when the text is
/// storable (after the caller trims it).
pub fn validate(text: &str) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }

    if text.trim().is_empty() {
        return Err(ValidationError::WhitespaceOnly);
    }

    if text_length(text) > MAX_TASK_LENGTH {
        return Err(ValidationError::MaxLengthExceeded);
    }

    Ok(())
}
