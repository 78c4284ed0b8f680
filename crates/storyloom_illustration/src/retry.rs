//! Per-call retry with exponential backoff.

use std::future::Future;
use std::time::Duration;
use storyloom_error::{ImageBackendError, ImageBackendResult};
use tokio_retry2::strategy::{ExponentialFactorBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::warn;

/// Retry budget applied to each backend call.
///
/// Only errors reporting [`ImageBackendError::is_retryable`] are retried.
/// The first retry waits the initial backoff and each later one doubles it,
/// capped at 30 seconds, with jitter applied on top. Once the budget is
/// spent the last error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: usize,
    initial_backoff: Duration,
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1, Duration::from_millis(1000))
    }
}

impl RetryPolicy {
    /// Policy allowing `max_retries` retries, starting from `initial_backoff`.
    pub fn new(max_retries: usize, initial_backoff: Duration) -> Self {
        Self {
            max_retries,
            initial_backoff,
            max_delay: Duration::from_secs(30),
        }
    }

    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Retries after the first attempt.
    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Unjittered wait before each retry, in order.
    pub fn backoff(&self) -> impl Iterator<Item = Duration> {
        let initial_ms = (self.initial_backoff.as_millis() as u64).max(1);
        ExponentialFactorBackoff::from_millis(initial_ms, 2.0)
            .max_delay(self.max_delay)
            .take(self.max_retries)
    }

    /// Runs `operation` until it succeeds, fails permanently, or the budget
    /// is spent.
    pub async fn run<F, Fut, T>(&self, mut operation: F) -> ImageBackendResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ImageBackendResult<T>>,
    {
        Retry::spawn(self.backoff().map(jitter), || {
            let attempt = operation();
            async move {
                match attempt.await {
                    Ok(value) => Ok(value),
                    Err(e) => classify(e),
                }
            }
        })
        .await
    }
}

fn classify<T>(e: ImageBackendError) -> Result<T, RetryError<ImageBackendError>> {
    if e.is_retryable() {
        warn!(error = %e, "Backend call failed, will retry");
        Err(RetryError::Transient {
            err: e,
            retry_after: None,
        })
    } else {
        warn!(error = %e, "Permanent backend error, failing immediately");
        Err(RetryError::Permanent(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storyloom_error::ImageBackendErrorKind;

    fn policy(retries: usize) -> RetryPolicy {
        RetryPolicy::new(retries, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn transient_error_is_retried() {
        let attempts = AtomicUsize::new(0);
        let result = policy(1)
            .run(|| {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(ImageBackendError::new(ImageBackendErrorKind::Timeout(5)))
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn permanent_error_is_not_retried() {
        let attempts = AtomicUsize::new(0);
        let result: ImageBackendResult<()> = policy(3)
            .run(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(ImageBackendError::new(ImageBackendErrorKind::Api {
                        status: 401,
                        message: "unauthorized".to_string(),
                    }))
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn budget_is_bounded() {
        let attempts = AtomicUsize::new(0);
        let result: ImageBackendResult<()> = policy(2)
            .run(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(ImageBackendError::new(ImageBackendErrorKind::Http(
                        "connection reset".to_string(),
                    )))
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn backoff_starts_at_initial_and_doubles() {
        let delays: Vec<_> = RetryPolicy::new(3, Duration::from_millis(1000))
            .backoff()
            .collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(1000),
                Duration::from_millis(2000),
                Duration::from_millis(4000),
            ]
        );
    }

    #[test]
    fn backoff_is_capped() {
        let delays: Vec<_> = RetryPolicy::new(6, Duration::from_secs(10))
            .backoff()
            .collect();
        assert_eq!(delays.len(), 6);
        assert_eq!(delays[1], Duration::from_secs(20));
        assert!(delays[2..].iter().all(|d| *d == Duration::from_secs(30)));
    }

    #[tokio::test]
    async fn none_makes_one_attempt() {
        let attempts = AtomicUsize::new(0);
        let _: ImageBackendResult<()> = RetryPolicy::none()
            .run(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(ImageBackendError::new(ImageBackendErrorKind::Timeout(1)))
                }
            })
            .await;
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
