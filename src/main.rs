//! Backend entry-point: wires the REST endpoints and OpenAPI docs.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use collections_api::ApiDoc;
use collections_api::domain::DatasetService;
use collections_api::inbound::http::data::get_data;
use collections_api::inbound::http::messages::{list_messages, post_message};
use collections_api::inbound::http::state::HttpState;
use collections_api::outbound::message_file::CsvMessageLog;
use collections_api::outbound::sheet_source::SheetHttpSource;

const DEFAULT_DATA_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vR-21kv5EFe1-Vp9TiY1GxsazJcG2fZj6qQ-24Z9Cveco76E22SDRbAya9s8PMPYXb-IvR8LdcOIFgd/pub?gid=421148399&single=true&output=csv";
const DEFAULT_MESSAGES_FILE: &str = "team_messages.csv";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let data_url =
        env::var("COLLECTIONS_DATA_URL").unwrap_or_else(|_| DEFAULT_DATA_URL.to_owned());
    let endpoint = Url::parse(&data_url)
        .map_err(|e| std::io::Error::other(format!("invalid COLLECTIONS_DATA_URL: {e}")))?;
    let messages_file =
        env::var("COLLECTIONS_MESSAGES_FILE").unwrap_or_else(|_| DEFAULT_MESSAGES_FILE.to_owned());
    let bind_addr =
        env::var("COLLECTIONS_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());

    let source = SheetHttpSource::new(endpoint, FETCH_TIMEOUT)
        .map_err(|e| std::io::Error::other(format!("failed to build HTTP client: {e}")))?;
    info!(addr = %bind_addr, messages_file = %messages_file, "starting collections API");
    let state = HttpState::new(
        Arc::new(DatasetService::new(Arc::new(source))),
        Arc::new(CsvMessageLog::new(messages_file)),
    );

    HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .service(get_data)
            .service(list_messages)
            .service(post_message);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?
    .run()
    .await
}
