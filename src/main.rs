use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod handlers;
mod models;
mod services;
mod utils;

use handlers::AppState;
use services::render_service::PlottersRenderer;
use services::ChartService;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("linechart_service=debug".parse().unwrap())
                .add_directive("warp=warn".parse().unwrap())
                .add_directive("hyper=warn".parse().unwrap()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("📊 Starting LineChart-Microservice v{}...", env!("CARGO_PKG_VERSION"));

    let config = match config::load() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    info!("   Image directory: {}", config.image_directory.display());
    info!("   Result links:    {}/charts/line/result/<id>", config.public_base_url);
    info!("   Workers:         {}", config.worker_threads);
    // Links advertise a 24 hour lifetime; removing old images is left to an external job
    info!("   Stored charts are never deleted by this service");

    let charts = ChartService::new(config.clone(), Arc::new(PlottersRenderer::new()));
    let routes = handlers::routes(AppState::new(charts));

    match warp::serve(routes).try_bind_ephemeral(([127, 0, 0, 1], config.port)) {
        Ok((address, server)) => {
            info!("LineChart-Microservice is running on {}", address);
            server.await;
        }
        Err(e) => {
            error!("Failed to listen on port {}: {}", config.port, e);
            std::process::exit(config::EXIT_BIND_FAILED);
        }
    }
}
