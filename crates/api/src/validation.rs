//! Request payload validation helpers.
//!
//! Formats follow the Brazilian conventions the data model uses: a
//! 3-digit COMPE bank code and an 11-digit CPF, both plain digit
//! strings with no separators.

use remita_shared::error::AppError;
use remita_shared::types::has_money_scale;
use rust_decimal::Decimal;

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Validates a 3-digit bank code.
///
/// # Errors
///
/// Returns `AppError::Validation` when the code is not exactly 3 digits.
pub fn validate_bank_code(code: &str) -> Result<(), AppError> {
    if is_digits(code, 3) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Bank code must be a number with 3 digits".to_string(),
        ))
    }
}

/// Validates an 11-digit CPF.
///
/// # Errors
///
/// Returns `AppError::Validation` when the CPF is not exactly 11 digits.
pub fn validate_cpf(cpf: &str) -> Result<(), AppError> {
    if is_digits(cpf, 11) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "CPF must be a number with 11 digits, with no dashes or dots".to_string(),
        ))
    }
}

/// Validates that a required string field is not blank.
///
/// # Errors
///
/// Returns `AppError::Validation` naming the field when it is blank.
pub fn validate_not_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::Validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

/// Validates a transfer amount: strictly positive, at most 2 decimal places.
///
/// # Errors
///
/// Returns `AppError::Validation` when the amount is not positive or
/// carries sub-cent precision.
pub fn validate_amount(amount: Decimal) -> Result<(), AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::Validation(
            "Amount must be greater than zero".to_string(),
        ));
    }
    if !has_money_scale(amount) {
        return Err(AppError::Validation(
            "Amount must have at most 2 decimal places".to_string(),
        ));
    }
    Ok(())
}

/// Validates an opening balance: non-negative, at most 2 decimal places.
///
/// # Errors
///
/// Returns `AppError::Validation` when the balance is negative or
/// carries sub-cent precision.
pub fn validate_balance(balance: Decimal) -> Result<(), AppError> {
    if balance < Decimal::ZERO {
        return Err(AppError::Validation(
            "Balance must not be negative".to_string(),
        ));
    }
    if !has_money_scale(balance) {
        return Err(AppError::Validation(
            "Balance must have at most 2 decimal places".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("000")]
    #[case("712")]
    #[case("999")]
    fn three_digit_bank_codes_are_accepted(#[case] code: &str) {
        assert!(validate_bank_code(code).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("1")]
    #[case("0001")]
    #[case("12A")]
    #[case("A12")]
    #[case(" 12")]
    #[case("123 ")]
    fn non_three_digit_bank_codes_are_refused(#[case] code: &str) {
        assert!(validate_bank_code(code).is_err());
    }

    #[rstest]
    #[case("12345678901")]
    #[case("00000000000")]
    fn eleven_digit_cpfs_are_accepted(#[case] cpf: &str) {
        assert!(validate_cpf(cpf).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("1234567890")]
    #[case("123456789012")]
    #[case("1234567890A")]
    #[case("123.456.789")]
    fn non_eleven_digit_cpfs_are_refused(#[case] cpf: &str) {
        assert!(validate_cpf(cpf).is_err());
    }

    #[test]
    fn blank_names_are_refused() {
        assert!(validate_not_blank("Name", "   ").is_err());
        assert!(validate_not_blank("Name", "Banco do Brasil").is_ok());
    }

    #[rstest]
    #[case(dec!(0.01))]
    #[case(dec!(1))]
    #[case(dec!(2000.00))]
    fn positive_two_decimal_amounts_are_accepted(#[case] amount: Decimal) {
        assert!(validate_amount(amount).is_ok());
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-1))]
    #[case(dec!(0.001))]
    #[case(dec!(10.995))]
    fn zero_negative_or_subcent_amounts_are_refused(#[case] amount: Decimal) {
        assert!(validate_amount(amount).is_err());
    }

    #[test]
    fn zero_balance_is_accepted_but_negative_is_not() {
        assert!(validate_balance(dec!(0)).is_ok());
        assert!(validate_balance(dec!(-0.01)).is_err());
        assert!(validate_balance(dec!(3.141)).is_err());
    }
}
