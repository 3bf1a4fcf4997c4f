//! Transfer error types.

use rust_decimal::Decimal;
use thiserror::Error;

use remita_shared::AppError;
use remita_shared::types::format_amount;

/// Errors that can occur while validating or executing a transfer.
#[derive(Debug, Clone, Error)]
pub enum TransferError {
    /// Source and destination are the same account.
    #[error("Transfers from one account to the same account are not allowed")]
    SameAccount,

    /// Source balance does not cover the requested amount.
    #[error("Transfer of R$ {} requested, but source account has R$ {}", format_amount(.requested), format_amount(.available))]
    InsufficientFunds {
        /// Amount the caller asked to transfer.
        requested: Decimal,
        /// Balance available on the source account.
        available: Decimal,
    },

    /// Source balance covers the amount but not the inter-bank commission.
    #[error("Account does not have enough funds to pay the inter-bank R$ {} commission", format_amount(.commission))]
    InsufficientCommissionFunds {
        /// Commission that could not be covered.
        commission: Decimal,
    },

    /// A single settlement attempt against the external service failed.
    ///
    /// Retryable while attempts remain; terminal once the retry bound is
    /// exhausted, at which point it must not be downgraded.
    #[error("Transfer service failed to settle the transfer")]
    ServiceFailure,
}

impl TransferError {
    /// Returns true if this error is transient and eligible for retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ServiceFailure)
    }
}

impl From<TransferError> for AppError {
    fn from(error: TransferError) -> Self {
        match &error {
            TransferError::SameAccount
            | TransferError::InsufficientFunds { .. }
            | TransferError::InsufficientCommissionFunds { .. } => {
                Self::BusinessRule(error.to_string())
            }
            TransferError::ServiceFailure => Self::ServiceUnavailable(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_only_service_failure_is_retryable() {
        assert!(TransferError::ServiceFailure.is_retryable());
        assert!(!TransferError::SameAccount.is_retryable());
        assert!(
            !TransferError::InsufficientFunds {
                requested: dec!(10),
                available: dec!(5),
            }
            .is_retryable()
        );
        assert!(
            !TransferError::InsufficientCommissionFunds {
                commission: dec!(5),
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_insufficient_funds_message_reports_both_amounts() {
        let error = TransferError::InsufficientFunds {
            requested: dec!(2000),
            available: dec!(100.5),
        };
        assert_eq!(
            error.to_string(),
            "Transfer of R$ 2,000.00 requested, but source account has R$ 100.50"
        );
    }

    #[test]
    fn test_commission_message_reports_commission() {
        let error = TransferError::InsufficientCommissionFunds {
            commission: dec!(5),
        };
        assert_eq!(
            error.to_string(),
            "Account does not have enough funds to pay the inter-bank R$ 5.00 commission"
        );
    }

    #[test]
    fn test_http_mapping() {
        assert_eq!(AppError::from(TransferError::SameAccount).status_code(), 400);
        assert_eq!(
            AppError::from(TransferError::InsufficientFunds {
                requested: dec!(10),
                available: dec!(5),
            })
            .status_code(),
            400
        );
        assert_eq!(
            AppError::from(TransferError::ServiceFailure).status_code(),
            503
        );
    }
}
