//! Team messages.
//!
//! A message is immutable once written: the log only ever appends. The
//! timestamp is always server-assigned in a fixed format whose
//! lexicographic order matches chronological order, so the newest-first
//! listing is a plain string sort.

use thiserror::Error;

use super::text::normalize_name;

/// Timestamp format for persisted messages (`YYYY-MM-DD HH:MM:SS`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A persisted team message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Author, normalized like officer names.
    pub name: String,
    /// Message text, trimmed.
    pub body: String,
    /// Server-assigned timestamp in [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
}

/// Validation failures for a message draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MessageDraftValidationError {
    /// Name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,
    /// Message text is empty after trimming.
    #[error("message must not be empty")]
    EmptyMessage,
}

/// A validated, normalized message awaiting its timestamp.
///
/// ## Invariants
/// - `name` is non-empty, trimmed, and title-cased.
/// - `body` is non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    name: String,
    body: String,
}

impl MessageDraft {
    /// Validate and normalize author and text.
    ///
    /// # Errors
    ///
    /// Rejects inputs that are empty after trimming; nothing is persisted
    /// for rejected drafts.
    pub fn new(
        name: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, MessageDraftValidationError> {
        let name = normalize_name(&name.into());
        if name.is_empty() {
            return Err(MessageDraftValidationError::EmptyName);
        }
        let body = body.into().trim().to_owned();
        if body.is_empty() {
            return Err(MessageDraftValidationError::EmptyMessage);
        }
        Ok(Self { name, body })
    }

    /// Normalized author name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed message text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Attach the server-assigned timestamp, producing the final message.
    pub fn stamp(self, timestamp: String) -> Message {
        Message {
            name: self.name,
            body: self.body,
            timestamp,
        }
    }
}
