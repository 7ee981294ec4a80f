use sopagrami_common::ParamsError;
use thiserror::Error;

/// Errors that end a mining run.
#[derive(Debug, Error)]
pub enum MiningError {
    /// The parameter set was rejected before any work started.
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] ParamsError),

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    /// The run was cancelled through its abort handle.
    #[error("mining run aborted")]
    Aborted,

    /// A worker panicked. The remaining workers were stopped.
    #[error("worker failed: {0}")]
    WorkerFailed(String),
}

impl MiningError {
    /// Create a thread-pool error.
    pub fn thread_pool(msg: impl Into<String>) -> Self {
        Self::ThreadPool(msg.into())
    }
}
