//! Worker pool — bounded admission for fetch tasks.

use std::sync::Arc;
use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

/// Bounded set of fetch slots shared by every aggregate call submitted to it.
///
/// Constructed explicitly with a fixed capacity and torn down explicitly with
/// [`shutdown`](WorkerPool::shutdown); never created implicitly per call.
/// Cloning is cheap and every clone shares the same permits, so one pool can
/// back several aggregators process-wide. Tasks waiting for admission queue on
/// the semaphore; submission itself never blocks.
#[derive(Clone, Debug)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl WorkerPool {
    /// Create a pool with `capacity` parallel fetch slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "worker pool capacity must be at least 1");
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// The configured concurrency ceiling
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Wait for a fetch slot. Fails only after [`shutdown`](WorkerPool::shutdown).
    pub(crate) async fn acquire(&self) -> std::result::Result<OwnedSemaphorePermit, AcquireError> {
        self.permits.clone().acquire_owned().await
    }

    /// Stop admitting fetches and wake every task queued for admission.
    ///
    /// In-flight fetches run to completion; tasks still waiting for a slot
    /// settle as cancelled.
    pub fn shutdown(&self) {
        self.permits.close();
    }

    /// Whether [`shutdown`](WorkerPool::shutdown) has been called
    pub fn is_shut_down(&self) -> bool {
        self.permits.is_closed()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_configured_capacity() {
        let pool = WorkerPool::new(4);
        assert_eq!(pool.capacity(), 4);
        assert!(!pool.is_shut_down());
    }

    #[test]
    #[should_panic(expected = "capacity must be at least 1")]
    fn zero_capacity_is_rejected() {
        let _ = WorkerPool::new(0);
    }

    #[tokio::test]
    async fn acquire_fails_after_shutdown() {
        let pool = WorkerPool::new(1);
        pool.shutdown();
        assert!(pool.is_shut_down());
        assert!(pool.acquire().await.is_err());
    }

    #[tokio::test]
    async fn clones_share_the_same_permits() {
        let pool = WorkerPool::new(1);
        let clone = pool.clone();

        let held = pool.acquire().await.unwrap();

        // The single slot is taken, so the clone cannot acquire immediately.
        let attempt =
            tokio::time::timeout(std::time::Duration::from_millis(50), clone.acquire()).await;
        assert!(attempt.is_err(), "clone should block while the slot is held");

        drop(held);
        assert!(clone.acquire().await.is_ok());
    }
}
