//! Exponential backoff retry over typed transient errors.

use dreadboard_error::{ConfigError, DreadboardResult, RetryableError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_retry2::{Retry, RetryError, strategy::jitter};
use tracing::{debug, warn};

/// How a backend call is retried.
///
/// The first attempt is made immediately. After a transient failure the
/// call is repeated up to `max_retries` more times, waiting
/// `initial_backoff_ms`, then twice that, then four times that, and so on,
/// never longer than `max_delay_secs`.
///
/// # Examples
///
/// ```
/// use dreadboard_retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// let delays: Vec<Duration> = policy.delays().collect();
/// assert_eq!(
///     delays,
///     vec![
///         Duration::from_millis(2000),
///         Duration::from_millis(4000),
///         Duration::from_millis(8000),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct RetryPolicy {
    /// Delay before the first retry, in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    initial_backoff_ms: u64,
    /// Number of retries after the first attempt (0 disables retry)
    #[serde(default = "default_max_retries")]
    max_retries: usize,
    /// Upper bound for a single delay, in seconds
    #[serde(default = "default_max_delay_secs")]
    max_delay_secs: u64,
    /// Randomize each delay to avoid synchronized retries
    #[serde(default)]
    jitter: bool,
}

fn default_initial_backoff_ms() -> u64 {
    2000
}

fn default_max_retries() -> usize {
    3
}

fn default_max_delay_secs() -> u64 {
    60
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_backoff_ms: default_initial_backoff_ms(),
            max_retries: default_max_retries(),
            max_delay_secs: default_max_delay_secs(),
            jitter: false,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with explicit parameters.
    pub fn new(initial_backoff_ms: u64, max_retries: usize, max_delay_secs: u64) -> Self {
        Self {
            initial_backoff_ms,
            max_retries,
            max_delay_secs,
            jitter: false,
        }
    }

    /// A policy that makes exactly one attempt.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Enable or disable jitter.
    pub fn with_jitter(mut self, enabled: bool) -> Self {
        self.jitter = enabled;
        self
    }

    /// Override the retry count.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Override the initial backoff.
    pub fn with_initial_backoff_ms(mut self, initial_backoff_ms: u64) -> Self {
        self.initial_backoff_ms = initial_backoff_ms;
        self
    }

    /// Checks that the schedule can make progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial backoff is zero while retries are
    /// enabled, or if the delay cap is zero.
    pub fn validate(&self) -> DreadboardResult<()> {
        if self.max_retries > 0 && self.initial_backoff_ms == 0 {
            return Err(ConfigError::new("retry.initial_backoff_ms must be greater than 0").into());
        }
        if self.max_delay_secs == 0 {
            return Err(ConfigError::new("retry.max_delay_secs must be greater than 0").into());
        }
        Ok(())
    }

    /// The delay schedule, one entry per retry.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let initial = self.initial_backoff_ms;
        let cap = Duration::from_secs(self.max_delay_secs);
        let use_jitter = self.jitter;
        (0..self.max_retries).map(move |retry| {
            let factor = 1u64.checked_shl(retry as u32).unwrap_or(u64::MAX);
            let delay = Duration::from_millis(initial.saturating_mul(factor)).min(cap);
            if use_jitter { jitter(delay) } else { delay }
        })
    }

    /// Execute an operation, retrying transient failures.
    ///
    /// Errors for which [`RetryableError::is_retryable`] is false are
    /// returned after the first attempt. Transient errors are retried on the
    /// [`delays`](Self::delays) schedule; when the schedule is exhausted the
    /// last error is returned.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let response = policy.execute(|| async { client.call(&request).await }).await?;
    /// ```
    pub async fn execute<F, Fut, R, E>(&self, mut operation: F) -> Result<R, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<R, E>>,
        E: RetryableError + std::fmt::Display,
    {
        let max_attempts = self.max_retries + 1;
        let mut attempt = 0usize;

        Retry::spawn(self.delays(), || {
            attempt += 1;
            let current = attempt;
            let fut = operation();
            async move {
                match fut.await {
                    Ok(value) => {
                        if current > 1 {
                            debug!(attempt = current, "Operation succeeded after retry");
                        }
                        Ok(value)
                    }
                    Err(e) if e.is_retryable() && current < max_attempts => {
                        warn!(
                            attempt = current,
                            max_attempts,
                            error = %e,
                            "Transient error, will retry"
                        );
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => {
                        warn!(attempt = current, error = %e, "Failing without further retry");
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await
    }
}
