//! Common utilities for the client implementation

use std::time::Duration;

use tracing::debug;

use crate::{
    JenkinsError,
    JenkinsResult,
};

/// Retry policy for idempotent reads
pub struct RetryPolicy {
    /// Maximum number of attempts
    pub max_retries: usize,
    /// Initial delay between retries
    pub initial_delay: Duration,
    /// Whether to use exponential backoff
    pub exponential_backoff: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(50),
            exponential_backoff: true,
        }
    }
}

impl RetryPolicy {
    /// Creates a new retry policy with custom settings
    pub fn new(max_retries: usize, initial_delay: Duration, exponential_backoff: bool) -> Self {
        Self {
            max_retries,
            initial_delay,
            exponential_backoff,
        }
    }

    /// A policy that runs the operation exactly once
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO, false)
    }

    /// Executes an operation, retrying only transport failures
    ///
    /// # Example
    ///
    /// ```ignore
    /// use jenkins_rest_api::RetryPolicy;
    ///
    /// let policy = RetryPolicy::default();
    /// let result = policy.retry(|| async {
    ///     Ok(())
    /// }).await?;
    /// ```
    pub async fn retry<F, Fut, T>(&self, operation: F) -> JenkinsResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = JenkinsResult<T>>,
    {
        let attempts = self.max_retries.max(1);
        let mut delay = self.initial_delay;
        let mut last_error = None;

        for attempt in 0..attempts {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if attempt < attempts - 1 => match &e {
                    JenkinsError::Network(_) => {
                        debug!(attempt = attempt + 1, error = %e, "retrying request");
                        last_error = Some(e);
                        tokio::time::sleep(delay).await;
                        if self.exponential_backoff {
                            delay *= 2;
                        }
                        continue;
                    }
                    _ => return Err(e),
                },
                Err(e) => {
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| JenkinsError::Network("Max retries exceeded".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[tokio::test]
    async fn test_retry_success() {
        let policy = RetryPolicy::default();
        let result = policy.retry(|| async { Ok::<_, JenkinsError>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_retry_eventual_success() {
        let policy = RetryPolicy::new(3, Duration::from_millis(10), false);
        let attempts = Cell::new(0);

        let result = policy
            .retry(|| async {
                let count = attempts.get() + 1;
                attempts.set(count);
                if count < 2 {
                    Err(JenkinsError::Network("Temporary failure".to_string()))
                } else {
                    Ok(42)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.get(), 2);
    }

    #[tokio::test]
    async fn test_retry_skips_non_network_errors() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1), false);
        let attempts = Cell::new(0);

        let result: JenkinsResult<()> = policy
            .retry(|| async {
                attempts.set(attempts.get() + 1);
                Err(JenkinsError::Serialization("bad json".to_string()))
            })
            .await;

        assert!(matches!(result, Err(JenkinsError::Serialization(_))));
        assert_eq!(attempts.get(), 1);
    }

    #[tokio::test]
    async fn test_none_runs_once() {
        let policy = RetryPolicy::none();
        let attempts = Cell::new(0);

        let result: JenkinsResult<()> = policy
            .retry(|| async {
                attempts.set(attempts.get() + 1);
                Err(JenkinsError::Network("down".to_string()))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.get(), 1);
    }
}
