//! Cancellable background work.

use std::future::Future;

use tokio::task::JoinHandle;

use crate::StorefrontError;

/// A spawned task owned by the scope that started it.
///
/// Dropping the handle aborts the task, so a completion never lands after
/// its owner has gone away.
#[derive(Debug)]
#[must_use = "dropping a ScopedTask aborts it"]
pub struct ScopedTask<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> ScopedTask<T> {
    /// Spawn `future` on the current runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }
}

impl<T> ScopedTask<T> {
    /// Request cancellation. A later [`join`](Self::join) reports
    /// [`StorefrontError::Cancelled`] unless the task had already finished.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task's output.
    pub async fn join(mut self) -> Result<T, StorefrontError> {
        Ok((&mut self.handle).await?)
    }
}

impl<T> Drop for ScopedTask<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_join_returns_output() {
        let task = ScopedTask::spawn(async { 21 * 2 });
        assert_eq!(task.join().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_abort_reports_cancelled() {
        let task = ScopedTask::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        task.abort();
        assert!(matches!(task.join().await, Err(StorefrontError::Cancelled)));
    }

    #[tokio::test]
    async fn test_drop_releases_future() {
        let owner = Arc::new(());
        let held = owner.clone();
        let task = ScopedTask::spawn(async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            drop(held);
        });
        assert_eq!(Arc::strong_count(&owner), 2);

        drop(task);
        for _ in 0..100 {
            if Arc::strong_count(&owner) == 1 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(Arc::strong_count(&owner), 1);
    }
}
