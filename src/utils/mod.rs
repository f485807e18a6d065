pub mod errors;
pub mod worker_pool;

pub use errors::ChartError;
pub use worker_pool::WorkerPool;
