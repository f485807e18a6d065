//! HTTP routing for the chart endpoints

pub mod line;
pub mod ping;
pub mod result;

use std::convert::Infallible;
use std::time::Instant;
use tracing::{error, warn};
use warp::http::Method;
use warp::reply::Json;
use warp::{Filter, Rejection, Reply};
use crate::config::ServiceConfig;
use crate::models::{MessageResponse, MESSAGE_NOT_IMPLEMENTED};
use crate::services::ChartService;
use crate::utils::ChartError;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub charts: ChartService,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(charts: ChartService) -> Self {
        AppState {
            charts,
            started_at: Instant::now(),
        }
    }
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// All chart routes.
///
/// `POST /charts/line`, `GET /charts/line/result/<id>` and `GET /charts/line/ping`;
/// any other method on these paths answers "not implemented".
pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let max_body_bytes = state.charts.config().max_body_bytes;

    let create = warp::path!("charts" / "line")
        .and(warp::post())
        .and(warp::body::content_length_limit(max_body_bytes))
        .and(warp::body::bytes())
        .and(with_state(state.clone()))
        .and_then(line::create_chart);

    let ping = warp::path!("charts" / "line" / "ping")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(ping::ping);

    let fetch = warp::path!("charts" / "line" / "result" / String)
        .and(warp::get())
        .and(with_state(state))
        .and_then(result::fetch_chart);

    let unsupported = warp::path!("charts" / "line")
        .and(not_implemented_unless(Method::POST))
        .or(warp::path!("charts" / "line" / "ping").and(not_implemented_unless(Method::GET)))
        .unify()
        .or(warp::path!("charts" / "line" / "result" / String)
            .and(not_implemented_unless(Method::GET))
            .map(|_argument: String, reply: Json| reply))
        .unify();

    create
        .or(ping)
        .or(fetch)
        .or(unsupported)
        .recover(handle_rejection)
}

/// Answers "not implemented" for every method except `allowed`
fn not_implemented_unless(allowed: Method) -> impl Filter<Extract = (Json,), Error = Rejection> + Clone {
    warp::method().and_then(move |method: Method| {
        let allowed = allowed.clone();
        async move {
            if method == allowed {
                Err(warp::reject::not_found())
            } else {
                warn!("🚫 Unsupported method {}", method);
                Ok(message_reply(MESSAGE_NOT_IMPLEMENTED))
            }
        }
    })
}

pub fn message_reply(message: impl Into<String>) -> Json {
    warp::reply::json(&MessageResponse::new(message))
}

/// Turn a pipeline error into its `{"Message": ...}` body
pub fn error_reply(err: &ChartError, config: &ServiceConfig) -> Json {
    if err.is_client_error() {
        warn!("Request rejected: {}", err);
    } else {
        error!("❌ Request failed: {}", err);
    }

    message_reply(err.user_message(&config.support_email))
}

/// Body-level rejections still answer with a JSON message
async fn handle_rejection(err: Rejection) -> Result<Json, Rejection> {
    if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        warn!("Request body too large");
        return Ok(message_reply(
            "Invalid data sent. The request body is too large. Please send a valid JSON-Object.",
        ));
    }

    if err.find::<warp::reject::LengthRequired>().is_some() {
        warn!("Request without Content-Length");
        return Ok(message_reply(
            "Invalid data sent. The request has no Content-Length header. Please send a valid JSON-Object.",
        ));
    }

    Err(err)
}
