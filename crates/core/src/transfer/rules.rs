//! Transfer rule engine: validation and commission computation.
//!
//! This module is pure: it inspects account snapshots and produces an
//! executable [`TransferPlan`] or a typed rejection. The two
//! insufficient-funds checks are sequential and separately reported on
//! purpose - callers can tell "funds do not cover the amount" apart from
//! "funds cover the amount but not the commission", and that distinction is
//! externally observable behavior.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::TransferError;
use super::strategy::SettlementPolicy;

/// Snapshot of the account fields the rule engine needs.
#[derive(Debug, Clone, Copy)]
pub struct AccountState {
    /// The account ID.
    pub id: Uuid,
    /// The bank this account belongs to.
    pub bank_id: Uuid,
    /// Current balance. Always non-negative.
    pub balance: Decimal,
}

/// A validated transfer, ready to settle and persist.
#[derive(Debug, Clone, Copy)]
pub struct TransferPlan {
    /// Source account ID.
    pub source_id: Uuid,
    /// Destination account ID.
    pub destination_id: Uuid,
    /// Amount the destination receives.
    pub amount: Decimal,
    /// Commission charged to the source (zero for intra-bank).
    pub commission: Decimal,
    /// Total debited from the source: `amount + commission`.
    pub source_debit: Decimal,
    /// Total credited to the destination: equals `amount`.
    pub destination_credit: Decimal,
    /// Settlement policy selected for this transfer.
    pub policy: SettlementPolicy,
}

/// Validates a transfer request and computes the commission.
///
/// Check order matters and is observable:
/// 1. source and destination must be different accounts;
/// 2. the source balance must cover the amount;
/// 3. the source balance must also cover the commission (reported as a
///    distinct error so the caller knows funds cover the transfer but not
///    the fee).
///
/// # Errors
///
/// Returns [`TransferError::SameAccount`] or one of the two
/// insufficient-funds variants.
pub fn plan_transfer(
    source: &AccountState,
    destination: &AccountState,
    amount: Decimal,
) -> Result<TransferPlan, TransferError> {
    if source.id == destination.id {
        return Err(TransferError::SameAccount);
    }

    if source.balance < amount {
        return Err(TransferError::InsufficientFunds {
            requested: amount,
            available: source.balance,
        });
    }

    let policy = SettlementPolicy::select(source.bank_id, destination.bank_id);
    let commission = policy.commission();

    if source.balance < amount + commission {
        return Err(TransferError::InsufficientCommissionFunds { commission });
    }

    Ok(TransferPlan {
        source_id: source.id,
        destination_id: destination.id,
        amount,
        commission,
        source_debit: amount + commission,
        destination_credit: amount,
        policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(bank_id: Uuid, balance: Decimal) -> AccountState {
        AccountState {
            id: Uuid::new_v4(),
            bank_id,
            balance,
        }
    }

    #[test]
    fn test_same_account_rejected_regardless_of_balance() {
        let bank = Uuid::new_v4();
        let source = account(bank, dec!(1_000_000));
        let destination = source;

        for amount in [dec!(0.01), dec!(100), dec!(999_999)] {
            assert!(matches!(
                plan_transfer(&source, &destination, amount),
                Err(TransferError::SameAccount)
            ));
        }
    }

    #[test]
    fn test_same_account_checked_before_balance() {
        let source = account(Uuid::new_v4(), dec!(0));
        // Balance would also fail, but the same-account check wins.
        assert!(matches!(
            plan_transfer(&source, &source, dec!(100)),
            Err(TransferError::SameAccount)
        ));
    }

    #[test]
    fn test_insufficient_funds_for_amount() {
        let source = account(Uuid::new_v4(), dec!(100));
        let destination = account(Uuid::new_v4(), dec!(0));

        let error = plan_transfer(&source, &destination, dec!(2000)).unwrap_err();
        match error {
            TransferError::InsufficientFunds {
                requested,
                available,
            } => {
                assert_eq!(requested, dec!(2000));
                assert_eq!(available, dec!(100));
            }
            other => panic!("expected InsufficientFunds, got {other:?}"),
        }
    }

    #[test]
    fn test_insufficient_funds_for_commission_is_distinct() {
        // Example scenario: amount 5000, balance 5000.00, inter-bank
        // commission 5.00 -> 5000 < 5005 fails on the commission check.
        let source = account(Uuid::new_v4(), dec!(5000.00));
        let destination = account(Uuid::new_v4(), dec!(0));

        let error = plan_transfer(&source, &destination, dec!(5000)).unwrap_err();
        assert!(matches!(
            error,
            TransferError::InsufficientCommissionFunds {
                commission
            } if commission == dec!(5.00)
        ));
    }

    #[test]
    fn test_exact_balance_covers_intra_bank_transfer() {
        let bank = Uuid::new_v4();
        let source = account(bank, dec!(500.00));
        let destination = account(bank, dec!(300.00));

        let plan = plan_transfer(&source, &destination, dec!(499.99)).unwrap();
        assert_eq!(plan.commission, Decimal::ZERO);
        assert_eq!(plan.source_debit, dec!(499.99));
        assert_eq!(plan.destination_credit, dec!(499.99));
        assert_eq!(plan.policy, SettlementPolicy::IntraBank);
    }

    #[test]
    fn test_intra_bank_never_charges_commission() {
        let bank = Uuid::new_v4();
        let source = account(bank, dec!(10_000));
        let destination = account(bank, dec!(0));

        for amount in [dec!(0.01), dec!(100), dec!(9_999.99)] {
            let plan = plan_transfer(&source, &destination, amount).unwrap();
            assert_eq!(plan.commission, Decimal::ZERO);
        }
    }

    #[test]
    fn test_inter_bank_charges_fixed_commission() {
        // Example scenario: balance 5000.00, different bank, amount 2000.00
        // -> source debit 2005.00, destination credit 2000.00.
        let source = account(Uuid::new_v4(), dec!(5000.00));
        let destination = account(Uuid::new_v4(), dec!(0));

        let plan = plan_transfer(&source, &destination, dec!(2000.00)).unwrap();
        assert_eq!(plan.commission, dec!(5.00));
        assert_eq!(plan.source_debit, dec!(2005.00));
        assert_eq!(plan.destination_credit, dec!(2000.00));
        assert_eq!(plan.policy, SettlementPolicy::InterBank);
        assert_eq!(source.balance - plan.source_debit, dec!(2995.00));
    }

    mod props {
        use super::*;
        use crate::transfer::strategy::INTER_BANK_COMMISSION;
        use proptest::prelude::*;

        fn amount_strategy() -> impl Strategy<Value = Decimal> {
            (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            /// Intra-bank plans never carry a commission and debit exactly
            /// the requested amount.
            #[test]
            fn prop_intra_bank_commission_always_zero(
                amount in amount_strategy(),
            ) {
                let bank = Uuid::new_v4();
                let source = account(bank, amount);
                let destination = account(bank, Decimal::ZERO);

                let plan = plan_transfer(&source, &destination, amount).unwrap();
                prop_assert_eq!(plan.commission, Decimal::ZERO);
                prop_assert_eq!(plan.source_debit, amount);
            }

            /// A rejected transfer reports the requested amount and the
            /// available balance exactly as given.
            #[test]
            fn prop_insufficient_funds_reports_inputs(
                amount in amount_strategy(),
            ) {
                let available = amount - Decimal::new(1, 2);
                let source = account(Uuid::new_v4(), available);
                let destination = account(Uuid::new_v4(), Decimal::ZERO);

                match plan_transfer(&source, &destination, amount) {
                    Err(TransferError::InsufficientFunds { requested, available: reported }) => {
                        prop_assert_eq!(requested, amount);
                        prop_assert_eq!(reported, available);
                    }
                    other => prop_assert!(false, "expected InsufficientFunds, got {:?}", other),
                }
            }

            /// Inter-bank plans always debit amount + 5.00.
            #[test]
            fn prop_inter_bank_debit_includes_commission(
                amount in amount_strategy(),
            ) {
                let source = account(Uuid::new_v4(), amount + INTER_BANK_COMMISSION);
                let destination = account(Uuid::new_v4(), Decimal::ZERO);

                let plan = plan_transfer(&source, &destination, amount).unwrap();
                prop_assert_eq!(plan.commission, INTER_BANK_COMMISSION);
                prop_assert_eq!(plan.source_debit, amount + INTER_BANK_COMMISSION);
                prop_assert_eq!(plan.destination_credit, amount);
            }
        }
    }

    #[test]
    fn test_amount_covered_but_not_commission_boundary() {
        let source = account(Uuid::new_v4(), dec!(2004.99));
        let destination = account(Uuid::new_v4(), dec!(0));

        assert!(matches!(
            plan_transfer(&source, &destination, dec!(2000.00)),
            Err(TransferError::InsufficientCommissionFunds { .. })
        ));

        let source = account(Uuid::new_v4(), dec!(2005.00));
        assert!(plan_transfer(&source, &destination, dec!(2000.00)).is_ok());
    }
}
