use std::convert::Infallible;
use warp::Reply;
use crate::handlers::AppState;
use crate::services::ping_service;

/// `GET /charts/line/ping`
pub async fn ping(state: AppState) -> Result<impl Reply, Infallible> {
    Ok(warp::reply::json(&ping_service::pong(state.started_at)))
}
