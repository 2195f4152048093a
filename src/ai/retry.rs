//! Exponential backoff for transient upstream failures

use std::future::Future;
use std::time::Duration;

use super::AiError;

/// Backoff policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_retries: u32,
    /// Sleep before the second attempt; doubled after every retry
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(2),
        }
    }
}

/// Run `op` until it succeeds, fails permanently, or attempts run out
///
/// Only errors for which [`AiError::is_transient`] holds are retried. The
/// last transient error is returned unchanged once attempts are exhausted.
///
/// # Arguments
/// * `policy` - Attempt count and initial delay
/// * `label` - Operation name for logging
/// * `op` - Produces a fresh future for every attempt
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut op: F,
) -> Result<T, AiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AiError>>,
{
    let attempts = policy.max_retries.max(1);
    let mut delay = policy.initial_delay;

    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < attempts => {
                tracing::warn!(
                    operation = label,
                    attempt = attempt,
                    max_attempts = attempts,
                    delay_secs = delay.as_secs_f64(),
                    error = %e,
                    "Model overloaded, retrying"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            initial_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let result = retry_with_backoff(&fast_policy(3), "test", || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(AiError::Overloaded("busy".into()))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let result: Result<(), _> = retry_with_backoff(&fast_policy(3), "test", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(AiError::Overloaded("still busy".into()))
            }
        })
        .await;

        assert!(matches!(result, Err(AiError::Overloaded(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_error_is_not_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let result: Result<(), _> = retry_with_backoff(&fast_policy(5), "test", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(AiError::Planning("bad json".into()))
            }
        })
        .await;

        assert!(matches!(result, Err(AiError::Planning(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_calls_once() {
        let result = retry_with_backoff(&fast_policy(0), "test", || async { Ok::<_, AiError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
