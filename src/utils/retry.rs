//! Retry with exponential backoff for preprint provider calls.
//!
//! Only failures classified as [`TransientError`] are retried; anything else
//! is returned to the caller on the first attempt.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::sources::SourceError;

/// Configuration for retry behavior
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for a single delay
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Set the attempt budget
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the first retry delay
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Backoff delay before retry number `retry` (1-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(retry.saturating_sub(1) as i32);
        let secs = (self.initial_delay.as_secs_f64() * factor).min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

/// Failures worth retrying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientError {
    /// Connection failure or timeout
    Network,
    /// HTTP 429
    RateLimit,
    /// HTTP 5xx
    Server(u16),
}

impl TransientError {
    /// Classify a source error
    pub fn from_source_error(err: &SourceError) -> Option<Self> {
        match err {
            SourceError::Network(_) => Some(TransientError::Network),
            SourceError::RateLimit => Some(TransientError::RateLimit),
            SourceError::Http { status } if *status >= 500 => Some(TransientError::Server(*status)),
            _ => None,
        }
    }

    /// Lower bound on the wait before retrying
    pub fn minimum_delay(&self) -> Duration {
        match self {
            TransientError::RateLimit => Duration::from_secs(3),
            TransientError::Network | TransientError::Server(_) => Duration::ZERO,
        }
    }
}

/// arXiv asks clients to wait three seconds between calls
pub fn arxiv_retry_config() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        initial_delay: Duration::from_secs(3),
        max_delay: Duration::from_secs(30),
        backoff_multiplier: 2.0,
    }
}

/// Run `operation`, retrying transient failures according to `config`
pub async fn with_retry<T, F, Fut>(config: RetryConfig, mut operation: F) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        let error = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!("Provider call succeeded on attempt {}", attempt);
                }
                return Ok(value);
            }
            Err(error) => error,
        };

        let Some(transient) = TransientError::from_source_error(&error) else {
            return Err(error);
        };

        if attempt >= config.max_attempts {
            tracing::warn!("Provider call failed after {} attempts: {}", attempt, error);
            return Err(error);
        }

        let delay = config.delay_for(attempt).max(transient.minimum_delay());
        tracing::debug!(
            "Transient error on attempt {} ({:?}), retrying in {:?}",
            attempt,
            transient,
            delay
        );
        sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn fast_config() -> RetryConfig {
        RetryConfig::default()
            .max_attempts(4)
            .initial_delay(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_retry_success_first_try() {
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        let result = with_retry(fast_config(), move || {
            let counter = counter.clone();
            async move {
                counter.set(counter.get() + 1);
                Ok::<_, SourceError>("ok")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_retry_success_after_failures() {
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        let result = with_retry(fast_config(), move || {
            let counter = counter.clone();
            async move {
                counter.set(counter.get() + 1);
                if counter.get() < 3 {
                    Err(SourceError::Http { status: 503 })
                } else {
                    Ok("ok")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_budget() {
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        let result: Result<(), _> = with_retry(fast_config(), move || {
            let counter = counter.clone();
            async move {
                counter.set(counter.get() + 1);
                Err(SourceError::Network("connection refused".to_string()))
            }
        })
        .await;

        assert!(matches!(result, Err(SourceError::Network(_))));
        assert_eq!(calls.get(), 4);
    }

    #[tokio::test]
    async fn test_retry_returns_permanent_error() {
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        let result: Result<(), _> = with_retry(fast_config(), move || {
            let counter = counter.clone();
            async move {
                counter.set(counter.get() + 1);
                Err(SourceError::Parse("bad feed".to_string()))
            }
        })
        .await;

        assert!(matches!(result, Err(SourceError::Parse(_))));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_transient_error_detection() {
        assert_eq!(
            TransientError::from_source_error(&SourceError::RateLimit),
            Some(TransientError::RateLimit)
        );
        assert_eq!(
            TransientError::from_source_error(&SourceError::Http { status: 502 }),
            Some(TransientError::Server(502))
        );
        assert!(TransientError::from_source_error(&SourceError::Http { status: 404 }).is_none());
    }

    #[test]
    fn test_backoff_is_capped() {
        let config = RetryConfig {
            max_attempts: 10,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        };

        assert_eq!(config.delay_for(1), Duration::from_secs(1));
        assert_eq!(config.delay_for(3), Duration::from_secs(4));
        assert_eq!(config.delay_for(6), Duration::from_secs(5));
    }
}
