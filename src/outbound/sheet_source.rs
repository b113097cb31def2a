//! Reqwest-backed spreadsheet source adapter.
//!
//! This adapter owns transport details only: the GET request, timeout
//! and HTTP error mapping, and CSV decoding into the domain table. No
//! retry; a failed fetch surfaces immediately as `SourceUnavailable` for
//! the request that triggered it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::domain::ports::{SheetSource, SheetSourceError};
use crate::domain::table::{CellValue, Table};

/// Spreadsheet source that fetches a published CSV export over HTTPS.
pub struct SheetHttpSource {
    client: Client,
    endpoint: Url,
}

impl SheetHttpSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl SheetSource for SheetHttpSource {
    async fn fetch_table(&self) -> Result<Table, SheetSourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "text/csv")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_table(body.as_ref())
    }
}

/// Decode a CSV body into a table. The first record is the header; rows
/// of uneven width are padded or truncated to it.
pub fn parse_table(body: &[u8]) -> Result<Table, SheetSourceError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(body);
    let columns = reader
        .headers()
        .map_err(|error| SheetSourceError::decode(format!("invalid CSV header: {error}")))?
        .iter()
        .map(str::to_owned)
        .collect();

    let mut table = Table::new(columns);
    for record in reader.records() {
        let record = record
            .map_err(|error| SheetSourceError::decode(format!("invalid CSV record: {error}")))?;
        table.push_row(record.iter().map(CellValue::parse).collect());
    }
    Ok(table)
}

fn map_transport_error(error: reqwest::Error) -> SheetSourceError {
    if error.is_timeout() {
        SheetSourceError::timeout(error.to_string())
    } else {
        SheetSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SheetSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            SheetSourceError::timeout(message)
        }
        _ => SheetSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
