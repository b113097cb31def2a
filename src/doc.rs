//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification for the REST API. It
//! registers the three operations from the inbound layer plus the error
//! envelope and message schemas. Swagger UI serves the document in debug
//! builds only.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::messages::{MessageResponse, PostMessageResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Officer Collections API",
        description = "Derived repayment dataset and team message log for the collections dashboard."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::data::get_data,
        crate::inbound::http::messages::list_messages,
        crate::inbound::http::messages::post_message,
    ),
    components(schemas(Error, ErrorCode, MessageResponse, PostMessageResponse)),
    tags(
        (name = "data", description = "Derived repayment data"),
        (name = "messages", description = "Team message log")
    )
)]
pub struct ApiDoc;
