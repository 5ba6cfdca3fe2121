//! Cancellation flag shared by a scheduled search and whoever requested it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Search cancellation token.
///
/// The requester keeps one clone and the scheduler keeps another; raising
/// the flag on either side tells the scheduler to drop the search before
/// its next step. The flag is never lowered again.
#[derive(Clone, Debug, Default)]
pub struct Context {
    cancelled: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the search this token guards should stop.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Ask the scheduler to drop the search. Idempotent.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}
