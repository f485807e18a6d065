use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;
use crate::utils::errors::ChartError;

/// Bounded pool of blocking workers.
///
/// Every job runs on tokio's blocking thread pool, but at most `size` jobs run
/// at once; further submissions wait for a free slot. The caller awaits a
/// single result per job.
#[derive(Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    /// Create a pool that runs at most `size` jobs concurrently (minimum 1)
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        WorkerPool {
            permits: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Run a blocking job and wait for its result
    pub async fn run<F, T>(&self, job: F) -> Result<T, ChartError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let _permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| ChartError::WorkerPool(format!("Failed to acquire worker: {}", e)))?;

        debug!("Worker acquired ({} idle)", self.permits.available_permits());

        tokio::task::spawn_blocking(job)
            .await
            .map_err(|e| ChartError::WorkerPool(format!("Worker task failed (panic/cancelled): {}", e)))
    }
}
