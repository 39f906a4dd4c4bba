use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Limits how many futures started through it make progress at the same time.
#[derive(Clone)]
pub struct ParallelRunner {
    permits: Arc<Semaphore>,
}

impl ParallelRunner {
    pub fn new(max_parallelism: NonZeroUsize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_parallelism.get())),
        }
    }

    /// Waits for a free slot before polling `run`. The slot is held until `run` completes.
    pub async fn run<F>(&self, run: F) -> F::Output
    where
        F: Future,
    {
        // The semaphore is owned by the runner and never closed, so acquiring can't fail.
        let _permit = self.permits.acquire().await;

        run.await
    }
}
