//! Domain types and services.
//!
//! Everything here is transport agnostic. The inbound HTTP adapter maps
//! [`Error`] to status codes; the outbound adapters implement the traits
//! in [`ports`].

pub mod columns;
pub mod dataset;
pub mod dataset_service;
pub mod error;
pub mod message;
pub mod ports;
pub mod table;
pub mod text;

pub use self::dataset::Dataset;
pub use self::dataset_service::DatasetService;
pub use self::error::{Error, ErrorCode};
pub use self::message::{Message, MessageDraft, MessageDraftValidationError, TIMESTAMP_FORMAT};
pub use self::table::{CellValue, Table};
