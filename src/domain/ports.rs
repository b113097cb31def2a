//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven
//! adapters (the remote spreadsheet and the message log file). Each
//! trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;

use super::error::Error as DomainError;
use super::message::{Message, MessageDraft, TIMESTAMP_FORMAT};
use super::table::Table;

/// Errors surfaced by the spreadsheet source adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetSourceError {
    /// Network-level failure reaching the source.
    #[error("sheet transport failure: {message}")]
    Transport { message: String },
    /// The fetch exceeded the configured timeout.
    #[error("sheet fetch timed out: {message}")]
    Timeout { message: String },
    /// The response body was not parseable CSV.
    #[error("sheet decode failure: {message}")]
    Decode { message: String },
}

impl SheetSourceError {
    /// Helper for transport-level failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for timeouts.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Helper for decode failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

impl From<SheetSourceError> for DomainError {
    fn from(err: SheetSourceError) -> Self {
        DomainError::source_unavailable(format!("Failed to load data: {err}"))
    }
}

/// Read-only access to the remote spreadsheet.
///
/// One fetch returns the whole table; there is no incremental or paged
/// access, matching the upstream CSV export.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetch and parse the raw table.
    async fn fetch_table(&self) -> Result<Table, SheetSourceError>;
}

/// Errors surfaced by the message log adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageLogError {
    /// Reading or writing the backing store failed.
    #[error("message log I/O failure: {message}")]
    Io { message: String },
    /// The backing store holds rows the adapter cannot decode.
    #[error("message log decode failure: {message}")]
    Decode { message: String },
}

impl MessageLogError {
    /// Helper for I/O failures.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Helper for decode failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

impl From<MessageLogError> for DomainError {
    fn from(err: MessageLogError) -> Self {
        DomainError::internal(format!("message log failure: {err}"))
    }
}

/// Append-only team message log.
#[async_trait]
pub trait MessageLog: Send + Sync {
    /// All messages, newest first. A log that has never been written is
    /// an empty list, not an error.
    async fn list(&self) -> Result<Vec<Message>, MessageLogError>;

    /// Stamp the draft with the current local time and persist it.
    async fn append(&self, draft: MessageDraft) -> Result<Message, MessageLogError>;
}

/// In-memory sheet source serving a fixed table; for tests and local
/// development without network access.
#[derive(Debug, Clone)]
pub struct FixtureSheetSource {
    table: Table,
}

impl FixtureSheetSource {
    /// Serve the given table on every fetch.
    pub fn new(table: Table) -> Self {
        Self { table }
    }
}

#[async_trait]
impl SheetSource for FixtureSheetSource {
    async fn fetch_table(&self) -> Result<Table, SheetSourceError> {
        Ok(self.table.clone())
    }
}

/// Sheet source that always fails; for exercising the 500 path.
#[derive(Debug, Clone, Default)]
pub struct UnavailableSheetSource;

#[async_trait]
impl SheetSource for UnavailableSheetSource {
    async fn fetch_table(&self) -> Result<Table, SheetSourceError> {
        Err(SheetSourceError::transport("fixture source is unavailable"))
    }
}

/// In-memory message log; for tests.
#[derive(Debug, Default)]
pub struct FixtureMessageLog {
    entries: std::sync::Mutex<Vec<Message>>,
}

impl FixtureMessageLog {
    /// Create an empty in-memory log.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageLog for FixtureMessageLog {
    async fn list(&self) -> Result<Vec<Message>, MessageLogError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| MessageLogError::io("fixture log poisoned"))?;
        Ok(newest_first(entries.clone()))
    }

    async fn append(&self, draft: MessageDraft) -> Result<Message, MessageLogError> {
        let message = draft.stamp(chrono::Local::now().format(TIMESTAMP_FORMAT).to_string());
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| MessageLogError::io("fixture log poisoned"))?;
        entries.push(message.clone());
        Ok(message)
    }
}

/// Sort messages newest first. Reversing before the stable sort keeps
/// later appends ahead of earlier ones when timestamps tie within a
/// second.
pub fn newest_first(mut messages: Vec<Message>) -> Vec<Message> {
    messages.reverse();
    messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    messages
}
