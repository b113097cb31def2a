//! Collections dashboard backend library.
//!
//! Layout follows a small hexagon: [`domain`] holds transport-agnostic
//! types and services, [`inbound`] the HTTP adapter, and [`outbound`]
//! the spreadsheet and message-log adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
