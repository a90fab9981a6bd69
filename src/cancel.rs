use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::SearchError;

/// Cooperative cancellation signal shared by every call made during one solve attempt.
///
/// Clones observe the same flag. Once cancelled, a token stays cancelled.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A token which has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; in-flight searches stop at their next poll.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether [`Self::cancel`] has been called on this token or any clone of it.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// [`Err`] with [`SearchError::Cancelled`] if cancellation has been requested.
    #[inline]
    pub fn check(&self) -> Result<(), SearchError> {
        match self.is_cancelled() {
            true => Err(SearchError::Cancelled),
            false => Ok(()),
        }
    }
}
