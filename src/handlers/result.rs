use std::convert::Infallible;
use tracing::info;
use warp::Reply;
use crate::handlers::{error_reply, AppState};
use crate::models::{DataResponse, MESSAGE_DATA};

/// `GET /charts/line/result/<id>`
pub async fn fetch_chart(argument: String, state: AppState) -> Result<impl Reply, Infallible> {
    info!("📤 Chart {} requested", argument);

    let reply = match state.charts.fetch_chart(argument).await {
        Ok(data) => warp::reply::json(&DataResponse {
            message: MESSAGE_DATA.to_string(),
            data,
        }),
        Err(e) => error_reply(&e, state.charts.config()),
    };

    Ok(reply)
}
