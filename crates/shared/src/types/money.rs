//! Monetary amount helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal` with at most two decimal places.

use rust_decimal::Decimal;

/// Number of decimal places carried by every monetary amount.
pub const MONEY_SCALE: u32 = 2;

/// Returns true if `amount` fits in the monetary scale (at most 2 decimal
/// places once trailing zeros are stripped).
#[must_use]
pub fn has_money_scale(amount: Decimal) -> bool {
    amount.normalize().scale() <= MONEY_SCALE
}

/// Formats an amount with exactly two decimal places and thousands
/// separators for user-facing messages, e.g. `2,000.00`.
#[must_use]
pub fn format_amount(amount: &Decimal) -> String {
    let mut amount = amount.round_dp(MONEY_SCALE);
    amount.rescale(MONEY_SCALE);
    let rendered = amount.to_string();

    let (unsigned, sign) = match rendered.strip_prefix('-') {
        Some(rest) => (rest, "-"),
        None => (rendered.as_str(), ""),
    };
    // rescale(2) guarantees a fractional part.
    let (int_part, frac_part) = unsigned
        .split_once('.')
        .unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(1500))]
    #[case(dec!(499.99))]
    #[case(dec!(0.01))]
    #[case(dec!(5.00))]
    #[case(dec!(5.000))] // trailing zeros do not count against the scale
    fn test_valid_money_scale(#[case] amount: Decimal) {
        assert!(has_money_scale(amount));
    }

    #[rstest]
    #[case(dec!(0.001))]
    #[case(dec!(100.123))]
    #[case(dec!(0.999999))]
    fn test_invalid_money_scale(#[case] amount: Decimal) {
        assert!(!has_money_scale(amount));
    }

    #[test]
    fn test_format_amount_pads_to_two_places() {
        assert_eq!(format_amount(&dec!(5)), "5.00");
        assert_eq!(format_amount(&dec!(499.99)), "499.99");
        assert_eq!(format_amount(&dec!(0.1)), "0.10");
    }

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(&dec!(2000)), "2,000.00");
        assert_eq!(format_amount(&dec!(1234567.89)), "1,234,567.89");
        assert_eq!(format_amount(&dec!(100)), "100.00");
        assert_eq!(format_amount(&dec!(-12500.5)), "-12,500.50");
    }
}
