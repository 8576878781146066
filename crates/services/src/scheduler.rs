//! Background work submission.
//!
//! Services never reach for a global runtime; they receive a `Scheduler` and
//! use it to spawn detached work and to wait out simulated latency.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::runtime::{Handle, TryCurrentError};

/// A detached unit of background work.
pub type Task = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

pub trait Scheduler: Send + Sync {
    /// Run `task` in the background. There is no cancellation.
    fn spawn(&self, task: Task);

    /// A future that completes after `duration`.
    fn sleep(&self, duration: Duration) -> Task;
}

/// `Scheduler` backed by a tokio runtime handle.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler for the runtime the caller is running on.
    ///
    /// # Errors
    ///
    /// Returns `TryCurrentError` when called outside a tokio runtime.
    pub fn current() -> Result<Self, TryCurrentError> {
        Handle::try_current().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn spawn(&self, task: Task) {
        // Detached: nobody joins background loads.
        drop(self.handle.spawn(task));
    }

    fn sleep(&self, duration: Duration) -> Task {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Artificial delays that stand in for network round trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulatedLatency {
    pub list: Duration,
    pub search: Duration,
    pub detail: Duration,
    pub enrollment: Duration,
    pub wishlist: Duration,
    pub learner: Duration,
    pub recent: Duration,
}

impl SimulatedLatency {
    /// No delays at all.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// The delays the mock backend was tuned with.
    #[must_use]
    pub fn mock_backend() -> Self {
        Self {
            list: Duration::from_millis(1_000),
            search: Duration::from_millis(500),
            detail: Duration::from_millis(500),
            enrollment: Duration::from_millis(300),
            wishlist: Duration::from_millis(200),
            learner: Duration::from_millis(800),
            recent: Duration::from_millis(600),
        }
    }
}

/// Wait for `duration` on `scheduler`, skipping the round trip when zero.
pub(crate) async fn pause(scheduler: &dyn Scheduler, duration: Duration) {
    if !duration.is_zero() {
        scheduler.sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn spawned_task_runs() {
        let scheduler = TokioScheduler::current().unwrap();
        let ran = Arc::new(AtomicBool::new(false));
        let (tx, rx) = oneshot::channel();

        let flag = Arc::clone(&ran);
        scheduler.spawn(Box::pin(async move {
            flag.store(true, Ordering::SeqCst);
            let _ = tx.send(());
        }));

        rx.await.unwrap();
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_waits_for_duration() {
        let scheduler = TokioScheduler::current().unwrap();
        let start = tokio::time::Instant::now();
        pause(&scheduler, Duration::from_millis(300)).await;
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[test]
    fn current_fails_outside_runtime() {
        assert!(TokioScheduler::current().is_err());
    }

    #[test]
    fn mock_backend_latency_is_nonzero() {
        let latency = SimulatedLatency::mock_backend();
        assert_eq!(latency.list, Duration::from_millis(1_000));
        assert_eq!(SimulatedLatency::none().search, Duration::ZERO);
    }
}
