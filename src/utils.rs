use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Fractional digits kept when a profit percent is rendered
pub const PERCENT_DISPLAY_SCALE: u32 = 3;

lazy_static! {
    static ref DECIMAL_RE: Regex = Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").unwrap();
}

// Parse a user supplied number, accepting both "." and "," as separator.
// Returns None when the text is not a plain decimal literal.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let normalized = text.replace(',', ".");

    if !DECIMAL_RE.is_match(&normalized) {
        return None;
    }

    Decimal::from_str(&normalized).ok()
}

// Truncate (never round) to the given number of fractional digits
pub fn truncate(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::ToZero)
}

// Format a decimal for display without trailing zeros
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

// Format a profit percent for display, truncated to PERCENT_DISPLAY_SCALE digits
pub fn format_percent(value: Decimal) -> String {
    format_decimal(truncate(value, PERCENT_DISPLAY_SCALE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_both_separators() {
        assert_eq!(parse_decimal("1.5"), Some(dec!(1.5)));
        assert_eq!(parse_decimal("1,5"), Some(dec!(1.5)));
        assert_eq!(parse_decimal("42"), Some(dec!(42)));
        assert_eq!(parse_decimal(".25"), Some(dec!(0.25)));
        assert_eq!(parse_decimal("-3,1"), Some(dec!(-3.1)));
    }

    #[test]
    fn rejects_non_literals() {
        for text in ["", "abc", "1.2.3", "1e5", "1_000", "12 5", ".", "1,000.5"] {
            assert_eq!(parse_decimal(text), None, "{text:?} should not parse");
        }
    }

    #[test]
    fn truncates_instead_of_rounding() {
        assert_eq!(truncate(dec!(33.33399), 3), dec!(33.333));
        assert_eq!(truncate(dec!(-1.9999), 3), dec!(-1.999));
        assert_eq!(format_percent(dec!(66.666666)), "66.666");
        assert_eq!(format_percent(dec!(50.0)), "50");
    }

    #[test]
    fn formats_without_trailing_zeros() {
        assert_eq!(format_decimal(dec!(100.00)), "100");
        assert_eq!(format_decimal(dec!(0.250)), "0.25");
    }
}
