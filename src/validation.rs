//! Validators for free-text wizard input.
//!
//! All functions are pure; the caller renders the returned
//! [`ValidationError`] as a chat message.

use rust_decimal::Decimal;

use crate::entity::ValidationError;
use crate::utils::parse_decimal;

/// Longest accepted numeric input, in characters
pub const MAX_NUMBER_LEN: usize = 12;

/// Longest accepted pair name, in characters
pub const MAX_PAIR_NAME_LEN: usize = 20;

/// Validate a price. Accepts `.` and `,` as decimal separator.
pub fn validate_price(text: &str) -> Result<Decimal, ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    if text.chars().count() > MAX_NUMBER_LEN {
        return Err(ValidationError::TooLong {
            max: MAX_NUMBER_LEN,
        });
    }

    let value = parse_decimal(text).ok_or(ValidationError::InvalidFormat)?;

    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeValue);
    }

    Ok(value)
}

/// Amounts follow the same rules as prices.
pub fn validate_amount(text: &str) -> Result<Decimal, ValidationError> {
    validate_price(text)
}

/// Validate a pair name and canonicalize it to uppercase.
pub fn validate_pair_name(text: &str) -> Result<String, ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    if text.chars().count() > MAX_PAIR_NAME_LEN {
        return Err(ValidationError::TooLong {
            max: MAX_PAIR_NAME_LEN,
        });
    }

    Ok(text.to_uppercase())
}
