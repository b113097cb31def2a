//! CSV-file-backed message log adapter.
//!
//! The backing store is a flat file with header `Name,Message,Timestamp`
//! that only ever grows. Appends read the full log, add the new row, and
//! rewrite the file wholesale; a crash mid-write can truncate the store.
//! Appends are serialized behind an in-process mutex so concurrent posts
//! cannot interleave, but there is no cross-process locking and no
//! transactional guarantee.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::domain::message::{Message, MessageDraft, TIMESTAMP_FORMAT};
use crate::domain::ports::{newest_first, MessageLog, MessageLogError};

/// Persisted row shape. Missing columns in hand-edited files default to
/// empty strings instead of failing the whole listing.
#[derive(Debug, Serialize, Deserialize)]
struct MessageRow {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Message", default)]
    message: String,
    #[serde(rename = "Timestamp", default)]
    timestamp: String,
}

impl From<Message> for MessageRow {
    fn from(value: Message) -> Self {
        Self {
            name: value.name,
            message: value.body,
            timestamp: value.timestamp,
        }
    }
}

impl From<MessageRow> for Message {
    fn from(value: MessageRow) -> Self {
        Self {
            name: value.name,
            body: value.message,
            timestamp: value.timestamp,
        }
    }
}

/// Message log backed by a single CSV file.
pub struct CsvMessageLog {
    path: PathBuf,
    write_guard: Mutex<()>,
}

impl CsvMessageLog {
    /// Use the given file as the backing store. The file is created on
    /// first append; a missing file lists as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_guard: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<Vec<Message>, MessageLogError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|error| MessageLogError::io(error.to_string()))?;
        let mut messages = Vec::new();
        for row in reader.deserialize::<MessageRow>() {
            let row = row.map_err(|error| MessageLogError::decode(error.to_string()))?;
            messages.push(Message::from(row));
        }
        Ok(messages)
    }

    fn write_all(&self, messages: Vec<Message>) -> Result<(), MessageLogError> {
        let mut writer = csv::Writer::from_path(&self.path)
            .map_err(|error| MessageLogError::io(error.to_string()))?;
        for message in messages {
            writer
                .serialize(MessageRow::from(message))
                .map_err(|error| MessageLogError::io(error.to_string()))?;
        }
        writer
            .flush()
            .map_err(|error| MessageLogError::io(error.to_string()))
    }
}

#[async_trait]
impl MessageLog for CsvMessageLog {
    async fn list(&self) -> Result<Vec<Message>, MessageLogError> {
        Ok(newest_first(self.read_all()?))
    }

    async fn append(&self, draft: MessageDraft) -> Result<Message, MessageLogError> {
        let _guard = self
            .write_guard
            .lock()
            .map_err(|_| MessageLogError::io("message log writer poisoned"))?;

        let mut messages = self.read_all()?;
        let message = draft.stamp(Local::now().format(TIMESTAMP_FORMAT).to_string());
        messages.push(message.clone());
        self.write_all(messages)?;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use std::fs;
    use tempfile::tempdir;

    fn draft(name: &str, body: &str) -> MessageDraft {
        MessageDraft::new(name, body).expect("valid draft")
    }

    #[actix_web::test]
    async fn missing_file_lists_as_empty() {
        let dir = tempdir().expect("temp dir");
        let log = CsvMessageLog::new(dir.path().join("team_messages.csv"));
        assert!(log.list().await.expect("list succeeds").is_empty());
    }

    #[actix_web::test]
    async fn append_writes_header_and_stamps_local_time() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("team_messages.csv");
        let log = CsvMessageLog::new(path.clone());

        let message = log.append(draft("  maria LOPEZ ", " hello ")).await.expect("append");
        assert_eq!(message.name, "Maria Lopez");
        assert_eq!(message.body, "hello");
        NaiveDateTime::parse_from_str(&message.timestamp, TIMESTAMP_FORMAT)
            .expect("timestamp matches the fixed format");

        let contents = fs::read_to_string(path).expect("file written");
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("Name,Message,Timestamp"));
        assert!(lines.next().expect("data row").starts_with("Maria Lopez,hello,"));
    }

    #[actix_web::test]
    async fn appends_survive_reopening_the_log() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("team_messages.csv");

        let log = CsvMessageLog::new(path.clone());
        log.append(draft("ada", "first")).await.expect("append");
        log.append(draft("grace", "second")).await.expect("append");
        drop(log);

        let reopened = CsvMessageLog::new(path);
        let listed = reopened.list().await.expect("list succeeds");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Grace", "newest message listed first");
        assert_eq!(listed[1].name, "Ada");
    }

    #[actix_web::test]
    async fn tolerates_rows_with_missing_columns() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("team_messages.csv");
        fs::write(&path, "Name,Message\nada,legacy row\n").expect("seed file");

        let log = CsvMessageLog::new(path);
        let listed = log.list().await.expect("list succeeds");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].timestamp, "", "missing column defaults to empty");
    }
}
