//! Generic bounded retry with exponential backoff and jitter.
//!
//! The executor is independent of the transfer domain: it takes any fallible
//! operation, a predicate designating which failures are retryable, an
//! injected random generator for jitter, and a [`Sleeper`] so tests can run
//! without real delays.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

/// Retry configuration: bounded attempts with exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum attempts, including the first one. Must be at least 1.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on any single delay (before jitter).
    pub max_delay: Duration,
    /// Exponential multiplier applied per retry.
    pub multiplier: f64,
    /// Whether to add random jitter (up to 50% of the delay) to each sleep.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(1000),
            multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Computes the backoff delay before retry number `attempt` (1-indexed:
    /// the delay slept after the first failed attempt is `delay_for(1)`).
    ///
    /// Returns `min(max_delay, initial_delay * multiplier^(attempt - 1))`.
    #[must_use]
    // Backoff math is on durations, not money; the float lint is scoped out here.
    #[allow(clippy::float_arithmetic, clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let millis = self.initial_delay.as_millis() as f64 * self.multiplier.powi(exponent as i32);
        let capped = millis.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(capped as u64)
    }

    /// Applies random jitter to a computed delay: up to 50% of the delay is
    /// added so that concurrent retries do not synchronize.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn with_jitter<R: Rng>(&self, delay: Duration, rng: &mut R) -> Duration {
        if !self.jitter {
            return delay;
        }
        let max_jitter_ms = delay.as_millis() as u64 / 2;
        if max_jitter_ms == 0 {
            return delay;
        }
        delay + Duration::from_millis(rng.random_range(0..=max_jitter_ms))
    }
}

/// Abstraction over sleeping so the executor is testable without real time.
pub trait Sleeper {
    /// Suspends the current task for `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Runs `operation` with bounded retries and exponential backoff.
///
/// The operation receives the injected generator so failure-injecting
/// operations and the jitter computation share a single seedable source.
/// Only errors for which `is_retryable` returns true trigger a retry; any
/// other error, and the final attempt's error, propagate to the caller.
///
/// # Errors
///
/// Returns the operation's error once retries are exhausted or a
/// non-retryable failure occurs.
pub async fn retry_with_backoff<T, E, R, S, Op, P>(
    policy: &RetryPolicy,
    rng: &mut R,
    sleeper: &S,
    is_retryable: P,
    mut operation: Op,
) -> Result<T, E>
where
    R: Rng,
    S: Sleeper,
    Op: FnMut(&mut R) -> Result<T, E>,
    P: Fn(&E) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation(rng) {
            Ok(value) => return Ok(value),
            Err(error) if is_retryable(&error) && attempt < max_attempts => {
                let delay = policy.with_jitter(policy.delay_for(attempt), rng);
                debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying after failure");
                sleeper.sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
