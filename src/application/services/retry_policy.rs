use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Bounded retry with clamped exponential backoff.
///
/// After the n-th failed attempt the caller waits
/// `multiplier * 2^(n-1)` seconds, clamped to `[min_backoff, max_backoff]`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    multiplier: f64,
    min_backoff: Duration,
    max_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(
        max_attempts: u32,
        multiplier: f64,
        min_backoff: Duration,
        max_backoff: Duration,
    ) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            multiplier,
            min_backoff,
            max_backoff: max_backoff.max(min_backoff),
        }
    }

    /// Single attempt, no waiting.
    pub fn no_retry() -> Self {
        Self::new(1, 0.0, Duration::ZERO, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1).min(62) as i32;
        let secs = self.multiplier * 2f64.powi(exponent);
        let (min, max) = (self.min_backoff.as_secs_f64(), self.max_backoff.as_secs_f64());
        let clamped = if secs.is_finite() {
            secs.clamp(min, max)
        } else {
            max
        };
        Duration::from_secs_f64(clamped)
    }

    /// Runs `operation` until it succeeds or the attempt budget is spent.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(label, attempt, "Succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if attempt >= self.max_attempts => {
                    tracing::error!(label, attempt, error = %e, "Retry budget exhausted");
                    return Err(RetryError {
                        attempts: attempt,
                        last_error: e,
                    });
                }
                Err(e) => {
                    let delay = self.backoff(attempt);
                    tracing::warn!(
                        label,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Attempt failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, 1.0, Duration::from_secs(4), Duration::from_secs(10))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("gave up after {attempts} attempts: {last_error}")]
pub struct RetryError<E: Display> {
    pub attempts: u32,
    pub last_error: E,
}
