//! Retry with exponential backoff for transport requests.
//!
//! Only the HTTP transport retries. The engine above it propagates the
//! final error unchanged.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,

    /// Delay before the first retry
    pub initial_delay: Duration,

    /// Maximum delay between retries
    pub max_delay: Duration,

    /// Base for exponential backoff (typically 2.0)
    pub exponential_base: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            exponential_base: 2.0,
        }
    }
}

impl RetryConfig {
    /// A configuration that tries exactly once.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::from_millis(0),
            max_delay: Duration::from_millis(0),
            exponential_base: 1.0,
        }
    }

    fn next_delay(&self, delay: Duration) -> Duration {
        Duration::from_secs_f64(
            (delay.as_secs_f64() * self.exponential_base).min(self.max_delay.as_secs_f64()),
        )
    }
}

/// Run `f` until it succeeds, fails with an error `is_retryable` rejects,
/// or `max_attempts` is reached.
///
/// # Example
///
/// ```rust,no_run
/// use ptero_app::retry::{with_retry_if, RetryConfig};
/// use ptero_core::TransportError;
///
/// async fn example() -> Result<(), TransportError> {
///     with_retry_if(
///         &RetryConfig::default(),
///         || async { Err(TransportError::Request("connection reset".into())) },
///         TransportError::is_transient,
///     )
///     .await
/// }
/// ```
pub async fn with_retry_if<F, Fut, T, E, P>(
    config: &RetryConfig,
    mut f: F,
    mut is_retryable: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Debug,
    P: FnMut(&E) -> bool,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay;

    loop {
        attempt += 1;

        match f().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!(attempts = attempt, "Request succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) if !is_retryable(&e) => {
                tracing::debug!(error = ?e, "Error is not retryable, returning immediately");
                return Err(e);
            }
            Err(e) if attempt >= config.max_attempts => {
                tracing::error!(attempts = attempt, error = ?e, "All retry attempts exhausted");
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(
                    attempt = attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis(),
                    error = ?e,
                    "Request failed, retrying"
                );

                sleep(delay).await;
                delay = config.next_delay(delay);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptero_core::TransportError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn quick(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
            exponential_base: 2.0,
        }
    }

    #[test]
    fn test_backoff_is_capped() {
        let config = RetryConfig {
            max_attempts: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(4),
            exponential_base: 2.0,
        };
        let d1 = config.next_delay(config.initial_delay);
        let d2 = config.next_delay(d1);
        let d3 = config.next_delay(d2);
        assert_eq!(d1, Duration::from_secs(2));
        assert_eq!(d2, Duration::from_secs(4));
        assert_eq!(d3, Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_transient_error_is_retried() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = with_retry_if(
            &quick(3),
            || {
                let counter = counter_clone.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(TransportError::Api { status: 503, message: "busy".into() })
                    } else {
                        Ok(7)
                    }
                }
            },
            TransportError::is_transient,
        )
        .await;

        assert_eq!(result, Ok(7));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permanent_error_is_not_retried() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = with_retry_if(
            &quick(3),
            || {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<i32, _>(TransportError::AuthenticationFailed)
                }
            },
            TransportError::is_transient,
        )
        .await;

        assert_eq!(result, Err(TransportError::AuthenticationFailed));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_attempts_are_bounded() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = with_retry_if(
            &quick(2),
            || {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<i32, _>(TransportError::Request("reset".into()))
                }
            },
            TransportError::is_transient,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_no_retry_tries_once() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let _ = with_retry_if(
            &RetryConfig::no_retry(),
            || {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<i32, _>(TransportError::Request("reset".into()))
                }
            },
            TransportError::is_transient,
        )
        .await;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
