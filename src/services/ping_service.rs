use std::time::Instant;
use tracing::debug;
use crate::models::{MessageResponse, MESSAGE_PONG};

/// Liveness answer; logs the service uptime
pub fn pong(started_at: Instant) -> MessageResponse {
    let elapsed = started_at.elapsed();
    let hours = elapsed.as_secs() / 3600;
    let minutes = (elapsed.as_secs() % 3600) / 60;
    let seconds = elapsed.as_secs() % 60;
    debug!("Ping - uptime {}h {}m {}s", hours, minutes, seconds);

    MessageResponse::new(MESSAGE_PONG)
}
