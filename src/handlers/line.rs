use std::convert::Infallible;
use tracing::info;
use warp::hyper::body::Bytes;
use warp::Reply;
use crate::handlers::{error_reply, AppState};
use crate::models::{LinkResponse, MESSAGE_LINK_CREATED};

/// `POST /charts/line`
pub async fn create_chart(body: Bytes, state: AppState) -> Result<impl Reply, Infallible> {
    info!("📥 Chart request received ({} bytes)", body.len());

    let config = state.charts.config();
    let reply = match state.charts.create_chart(body.to_vec()).await {
        Ok(artifact) => warp::reply::json(&LinkResponse {
            link: config.result_link(&artifact.id),
            message: MESSAGE_LINK_CREATED.to_string(),
        }),
        Err(e) => error_reply(&e, config),
    };

    Ok(reply)
}
