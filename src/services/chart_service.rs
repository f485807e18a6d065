use std::sync::Arc;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tracing::{debug, info};
use crate::config::ServiceConfig;
use crate::models::Artifact;
use crate::services::artifact_service::ArtifactStore;
use crate::services::render_service::{compose_scene, ChartRenderer};
use crate::services::{series_service, validation_service};
use crate::utils::{ChartError, WorkerPool};

/// Runs chart creation and retrieval on the worker pool
#[derive(Clone)]
pub struct ChartService {
    config: Arc<ServiceConfig>,
    store: Arc<ArtifactStore>,
    renderer: Arc<dyn ChartRenderer>,
    pool: WorkerPool,
}

impl ChartService {
    pub fn new(config: Arc<ServiceConfig>, renderer: Arc<dyn ChartRenderer>) -> Self {
        let store = Arc::new(ArtifactStore::new(config.image_directory.clone()));
        let pool = WorkerPool::new(config.worker_threads);
        debug!("Chart worker pool with {} workers", pool.size());

        ChartService {
            config,
            store,
            renderer,
            pool,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Validate, render and store a chart; resolves once the image is on disk
    pub async fn create_chart(&self, body: Vec<u8>) -> Result<Artifact, ChartError> {
        let store = self.store.clone();
        let renderer = self.renderer.clone();
        let max_points = self.config.max_points;

        self.pool
            .run(move || run_pipeline(&body, &store, renderer.as_ref(), max_points))
            .await?
    }

    /// Read a stored chart and return it base64-encoded
    pub async fn fetch_chart(&self, argument: String) -> Result<String, ChartError> {
        let store = self.store.clone();

        let bytes = self.pool.run(move || store.fetch(&argument)).await??;
        Ok(BASE64.encode(bytes))
    }
}

/// The full creation pipeline. Nothing is written unless every earlier step succeeded.
pub fn run_pipeline(
    body: &[u8],
    store: &ArtifactStore,
    renderer: &dyn ChartRenderer,
    max_points: usize,
) -> Result<Artifact, ChartError> {
    let request = validation_service::validate_chart_request(body, max_points)?;
    let data = series_service::build_chart_data(&request);

    let scene = compose_scene(&data);
    debug!("Composed scene with {} series", scene.series.len());

    let bytes = renderer.render(&scene)?;
    let artifact = store.publish(bytes)?;

    info!(
        "📈 Chart {} created at {} ({} series, {} bytes)",
        artifact.id,
        artifact.created_at.to_rfc3339(),
        scene.series.len(),
        artifact.image_bytes.len()
    );
    Ok(artifact)
}
