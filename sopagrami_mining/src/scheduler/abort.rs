use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shareable cancellation flag for a mining run.
///
/// Workers check it between patterns; an aborted run returns
/// [`MiningError::Aborted`](crate::MiningError::Aborted).
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    flag: Arc<AtomicBool>,
}

impl AbortHandle {
    /// A handle that has not been triggered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn abort(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns true once cancellation was requested.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
