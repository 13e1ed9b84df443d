use crate::client_discovery::policies::RetryPolicy;
use crate::shared::error::CollectorError;
use crate::shared::{RateLimiter, Result};
use std::future::Future;
use std::sync::Arc;

/// Runs calls against one external service under its rate limiter and retry policy.
///
/// Every attempt, retries included, first waits for a limiter token.
#[derive(Debug, Clone)]
pub struct RetryingExecutor {
    limiter: Arc<RateLimiter>,
    policy: RetryPolicy,
}

impl RetryingExecutor {
    pub fn new(limiter: Arc<RateLimiter>, policy: RetryPolicy) -> Self {
        Self { limiter, policy }
    }

    /// Attempts `call` until it succeeds or the policy gives up.
    ///
    /// # Arguments
    /// * `operation` - Human-readable description used in logs and errors
    /// * `call` - Produces a fresh attempt each time it is invoked
    ///
    /// # Errors
    /// Returns the error unchanged when the policy classifies it as fatal, or
    /// wrapped in `CollectorError::RetriesExhausted` when the attempt budget runs out.
    pub async fn execute<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempts = 0u32;
        loop {
            self.limiter.acquire().await;
            attempts = attempts.saturating_add(1);

            let error = match call().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if !self.policy.is_retryable(&error) {
                tracing::debug!(operation, error = %error, "error is not retryable");
                return Err(error);
            }

            if !self.policy.should_retry(attempts, &error) {
                tracing::warn!(operation, attempts, error = %error, "giving up");
                let last_error = format!("{:#}", error);
                return Err(error.context(CollectorError::RetriesExhausted {
                    operation: operation.to_string(),
                    attempts,
                    last_error,
                }));
            }

            let delay = self.policy.delay_for(attempts);
            tracing::warn!(
                operation,
                attempt = attempts,
                cooldown_secs = delay.as_secs_f64(),
                error = %error,
                "request failed, probably got kicked; retrying after cooldown"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Acquires a token and runs `call` exactly once.
    pub async fn execute_once<T, F, Fut>(&self, call: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.limiter.acquire().await;
        call().await
    }
}
