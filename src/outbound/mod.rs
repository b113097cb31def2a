//! Outbound adapters implementing the domain ports.

pub mod message_file;
pub mod sheet_source;
