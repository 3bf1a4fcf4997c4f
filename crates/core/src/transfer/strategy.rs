//! Settlement policy selection and execution.
//!
//! A transfer settles through one of two policies, chosen by a pure
//! predicate on the bank ids of the two accounts. Both policies stand in for
//! real core-banking integrations: the intra-bank one always succeeds, the
//! inter-bank one fails independently at random to simulate an unreliable
//! downstream service. Neither has any observable side effect on failure,
//! which is what makes retrying safe.

use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use super::error::TransferError;

/// Fixed commission charged to the source account on inter-bank transfers,
/// in the domain currency (R$).
pub const INTER_BANK_COMMISSION: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

/// How a transfer settles, depending on whether both accounts belong to the
/// same bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementPolicy {
    /// Both accounts at the same bank; settles internally, no commission.
    IntraBank,
    /// Accounts at different banks; carries a fixed commission and an
    /// unreliable external settlement call.
    InterBank,
}

impl SettlementPolicy {
    /// Selects the policy for a transfer between the given banks.
    #[must_use]
    pub fn select(source_bank_id: Uuid, destination_bank_id: Uuid) -> Self {
        if source_bank_id == destination_bank_id {
            Self::IntraBank
        } else {
            Self::InterBank
        }
    }

    /// Commission charged by this policy.
    #[must_use]
    pub const fn commission(&self) -> Decimal {
        match self {
            Self::IntraBank => Decimal::ZERO,
            Self::InterBank => INTER_BANK_COMMISSION,
        }
    }

    /// Performs one settlement attempt.
    ///
    /// The inter-bank variant fails with probability `failure_chance`,
    /// signalling [`TransferError::ServiceFailure`] (the retryable kind).
    /// No side effect occurs on failure.
    ///
    /// # Errors
    ///
    /// Returns `TransferError::ServiceFailure` when the simulated external
    /// service rejects the attempt.
    pub fn settle<R: Rng>(
        &self,
        rng: &mut R,
        failure_chance: f64,
    ) -> Result<(), TransferError> {
        match self {
            Self::IntraBank => {
                // This is where a real internal settlement call would go.
                Ok(())
            }
            Self::InterBank => {
                if rng.random_bool(failure_chance.clamp(0.0, 1.0)) {
                    debug!("inter-bank settlement attempt failed");
                    return Err(TransferError::ServiceFailure);
                }
                // This is where a real external settlement call would go.
                Ok(())
            }
        }
    }
}
