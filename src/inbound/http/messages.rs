//! Team message HTTP handlers.
//!
//! ```text
//! GET  /messages
//! POST /messages?name=..&message=..
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Message, MessageDraft, MessageDraftValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// One message as served to the dashboard. Field names keep the backing
/// file's capitalized headers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

impl From<Message> for MessageResponse {
    fn from(value: Message) -> Self {
        Self {
            name: value.name,
            message: value.body,
            timestamp: value.timestamp,
        }
    }
}

/// Query parameters for posting a message. Absent parameters are treated
/// the same as empty ones and rejected by validation.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostMessageParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}

/// Acknowledgement returned after a successful post.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostMessageResponse {
    pub status: String,
    pub message: String,
}

fn map_draft_error(err: MessageDraftValidationError) -> Error {
    let field = match err {
        MessageDraftValidationError::EmptyName => "name",
        MessageDraftValidationError::EmptyMessage => "message",
    };
    Error::invalid_request("Name and message cannot be empty")
        .with_details(json!({ "field": field }))
}

/// List all team messages, newest first.
#[utoipa::path(
    get,
    path = "/messages",
    responses(
        (status = 200, description = "Messages, newest first; empty log yields []", body = [MessageResponse]),
        (status = 500, description = "Message log unreadable", body = Error)
    ),
    tags = ["messages"],
    operation_id = "listMessages"
)]
#[get("/messages")]
pub async fn list_messages(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<MessageResponse>>> {
    let messages = state.messages.list().await?;
    Ok(web::Json(
        messages.into_iter().map(MessageResponse::from).collect(),
    ))
}

/// Append a team message.
///
/// The author name is normalized like officer names (trim +
/// title-case), the text is trimmed, and the timestamp is assigned by
/// the server.
///
/// # Errors
///
/// - `400 Bad Request`: `name` or `message` empty after trimming;
///   nothing is appended.
#[utoipa::path(
    post,
    path = "/messages",
    params(PostMessageParams),
    responses(
        (status = 200, description = "Message appended", body = PostMessageResponse),
        (status = 400, description = "Empty name or message", body = Error),
        (status = 500, description = "Message log unwritable", body = Error)
    ),
    tags = ["messages"],
    operation_id = "postMessage"
)]
#[post("/messages")]
pub async fn post_message(
    state: web::Data<HttpState>,
    params: web::Query<PostMessageParams>,
) -> ApiResult<web::Json<PostMessageResponse>> {
    let params = params.into_inner();
    let draft = MessageDraft::new(params.name, params.message).map_err(map_draft_error)?;
    let message = state.messages.append(draft).await?;
    info!(author = %message.name, "team message posted");
    Ok(web::Json(PostMessageResponse {
        status: "success".to_owned(),
        message: "Message posted!".to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DatasetService;
    use crate::domain::ports::{FixtureMessageLog, FixtureSheetSource, MessageLog};
    use crate::domain::{TIMESTAMP_FORMAT, Table};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::NaiveDateTime;
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    fn test_state() -> (HttpState, Arc<FixtureMessageLog>) {
        let log = Arc::new(FixtureMessageLog::new());
        let state = HttpState::new(
            Arc::new(DatasetService::new(Arc::new(FixtureSheetSource::new(
                Table::default(),
            )))),
            log.clone(),
        );
        (state, log)
    }

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .service(list_messages)
            .service(post_message)
    }

    #[actix_web::test]
    async fn empty_log_lists_as_empty_array() {
        let (state, _log) = test_state();
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/messages").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[actix_web::test]
    async fn posting_then_listing_shows_the_message_first() {
        let (state, _log) = test_state();
        let app = actix_test::init_service(test_app(state)).await;

        for (name, text) in [("ada", "older%20note"), ("grace%20lee", "newest%20note")] {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri(&format!("/messages?name={name}&message={text}"))
                    .to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);

            let body: Value = actix_test::read_body_json(response).await;
            assert_eq!(body["status"], "success");
            assert_eq!(body["message"], "Message posted!");
        }

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/messages").to_request(),
        )
        .await;
        let body: Value = actix_test::read_body_json(response).await;
        let listed = body.as_array().expect("message array");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["Name"], "Grace Lee");
        assert_eq!(listed[0]["Message"], "newest note");

        let timestamp = listed[0]["Timestamp"].as_str().expect("timestamp text");
        NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
            .expect("timestamp matches YYYY-MM-DD HH:MM:SS");
    }

    #[rstest]
    #[case("name=&message=hello")]
    #[case("name=%20%20%20&message=hello")]
    #[case("name=Maria&message=")]
    #[case("name=Maria&message=%20%20")]
    #[case("message=hello")]
    #[case("name=Maria")]
    #[actix_web::test]
    async fn blank_input_is_rejected_without_side_effect(#[case] query: &str) {
        let (state, log) = test_state();
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/messages?{query}"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["message"], "Name and message cannot be empty");
        assert!(
            log.list().await.expect("list succeeds").is_empty(),
            "rejected posts must not append"
        );
    }
}
