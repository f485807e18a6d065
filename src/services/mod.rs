pub mod artifact_service;
pub mod chart_service;
pub mod merge_service;
pub mod ping_service;
pub mod render_service;
pub mod series_service;
pub mod validation_service;

pub use chart_service::ChartService;
