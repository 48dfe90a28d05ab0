//! Retry utilities with a fixed-delay budget

use std::future::Future;
use std::time::Duration;

use crate::error::ProviderError;

#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }
}

/// Execute an async operation, retrying recoverable failures after a fixed
/// delay until the attempt budget is exhausted.
pub async fn with_retry<F, T, Fut>(config: &RetryConfig, mut op: F) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut last_error = None;

    for attempt in 0..config.max_attempts {
        if attempt > 0 {
            tracing::debug!(
                "Retry attempt {}/{} after {:?}",
                attempt + 1,
                config.max_attempts,
                config.delay
            );
            tokio::time::sleep(config.delay).await;
        }

        match op().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_recoverable() && attempt + 1 < config.max_attempts => {
                tracing::warn!(
                    "Operation failed (attempt {}/{}): {}",
                    attempt + 1,
                    config.max_attempts,
                    e
                );
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error.expect("Should have an error after all retries failed"))
}
