//! HTTP inbound adapter exposing the REST endpoints.

pub mod data;
pub mod error;
pub mod messages;
pub mod state;

pub use error::ApiResult;
