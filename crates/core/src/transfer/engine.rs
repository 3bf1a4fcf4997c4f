//! Transfer engine: settlement execution with bounded retries.

use rand::Rng;
use tracing::{debug, warn};

use crate::retry::{RetryPolicy, Sleeper, retry_with_backoff};

use super::error::TransferError;
use super::rules::TransferPlan;

/// Executes a planned transfer's settlement, retrying transient failures.
///
/// The engine holds no state about individual transfers; randomness and
/// sleeping are injected per call so tests are deterministic and instant.
#[derive(Debug, Clone)]
pub struct TransferEngine {
    retry: RetryPolicy,
    failure_chance: f64,
}

impl TransferEngine {
    /// Creates an engine with the given retry policy and single-attempt
    /// failure probability for the simulated inter-bank service.
    #[must_use]
    pub const fn new(retry: RetryPolicy, failure_chance: f64) -> Self {
        Self {
            retry,
            failure_chance,
        }
    }

    /// Retry policy in effect.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Runs the plan's settlement policy, retrying `ServiceFailure` up to
    /// the configured attempt bound. Must be called before any balance is
    /// mutated: a terminal failure here leaves nothing to roll back.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::ServiceFailure`] once all attempts are
    /// exhausted.
    pub async fn settle<R, S>(
        &self,
        plan: &TransferPlan,
        rng: &mut R,
        sleeper: &S,
    ) -> Result<(), TransferError>
    where
        R: Rng,
        S: Sleeper,
    {
        let result = retry_with_backoff(
            &self.retry,
            rng,
            sleeper,
            TransferError::is_retryable,
            |rng| plan.policy.settle(rng, self.failure_chance),
        )
        .await;

        match &result {
            Ok(()) => debug!(
                source = %plan.source_id,
                destination = %plan.destination_id,
                "settlement succeeded"
            ),
            Err(error) => warn!(
                source = %plan.source_id,
                destination = %plan.destination_id,
                %error,
                "settlement failed after exhausting retries"
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::rules::{AccountState, plan_transfer};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;
    use std::time::Duration;
    use uuid::Uuid;

    struct CountingSleeper {
        sleeps: Mutex<u32>,
    }

    impl Sleeper for CountingSleeper {
        async fn sleep(&self, _duration: Duration) {
            *self.sleeps.lock().unwrap() += 1;
        }
    }

    fn inter_bank_plan() -> crate::transfer::rules::TransferPlan {
        let source = AccountState {
            id: Uuid::new_v4(),
            bank_id: Uuid::new_v4(),
            balance: dec!(5000),
        };
        let destination = AccountState {
            id: Uuid::new_v4(),
            bank_id: Uuid::new_v4(),
            balance: dec!(0),
        };
        plan_transfer(&source, &destination, dec!(2000)).unwrap()
    }

    #[tokio::test]
    async fn test_always_failing_service_is_terminal_after_max_attempts() {
        let engine = TransferEngine::new(RetryPolicy::default(), 1.0);
        let plan = inter_bank_plan();
        let mut rng = StdRng::seed_from_u64(3);
        let sleeper = CountingSleeper {
            sleeps: Mutex::new(0),
        };

        let result = engine.settle(&plan, &mut rng, &sleeper).await;

        assert!(matches!(result, Err(TransferError::ServiceFailure)));
        // max_attempts - 1 sleeps between the 6 attempts.
        assert_eq!(*sleeper.sleeps.lock().unwrap(), 5);
    }

    #[tokio::test]
    async fn test_reliable_service_settles_without_retrying() {
        let engine = TransferEngine::new(RetryPolicy::default(), 0.0);
        let plan = inter_bank_plan();
        let mut rng = StdRng::seed_from_u64(3);
        let sleeper = CountingSleeper {
            sleeps: Mutex::new(0),
        };

        assert!(engine.settle(&plan, &mut rng, &sleeper).await.is_ok());
        assert_eq!(*sleeper.sleeps.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_intra_bank_settlement_ignores_failure_chance() {
        let bank = Uuid::new_v4();
        let source = AccountState {
            id: Uuid::new_v4(),
            bank_id: bank,
            balance: dec!(500),
        };
        let destination = AccountState {
            id: Uuid::new_v4(),
            bank_id: bank,
            balance: dec!(300),
        };
        let plan = plan_transfer(&source, &destination, dec!(499.99)).unwrap();

        let engine = TransferEngine::new(RetryPolicy::default(), 1.0);
        let mut rng = StdRng::seed_from_u64(9);
        let sleeper = CountingSleeper {
            sleeps: Mutex::new(0),
        };

        assert!(engine.settle(&plan, &mut rng, &sleeper).await.is_ok());
    }
}
