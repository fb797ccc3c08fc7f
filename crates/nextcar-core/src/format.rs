//! # Field Formatters
//!
//! Keystroke formatters for the listing form and the inventory cards.
//!
//! ## Strip-then-Format Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types into "Valor (R$)"                                           │
//! │                                                                         │
//! │   "R$ 1.234,5" + "6"  ──strip──►  "123456"  ──format──►  "R$ 1.234,56"  │
//! │                                                                         │
//! │  Every keystroke re-runs the whole pipeline on the field's new text,    │
//! │  so formatted output fed back in yields the same output.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both formatters work on digit strings rather than parsed numbers, which
//! keeps them exact for inputs of any length.

use crate::error::ValidationError;
use crate::money::Money;

/// Removes every character that is not an ASCII digit.
pub fn strip_formatting(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Inserts a `.` between every group of three digits, counting from the right.
///
/// Expects a bare digit string.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Formats the price field: digits are centavos.
///
/// Empty input stays empty so the placeholder shows; any other input renders
/// a value, even when it carries no digits.
///
/// ## Example
/// ```rust
/// use nextcar_core::format::format_currency;
///
/// assert_eq!(format_currency("123456"), "R$ 1.234,56");
/// assert_eq!(format_currency("7"), "R$ 0,07");
/// assert_eq!(format_currency(""), "");
/// ```
pub fn format_currency(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let digits = strip_formatting(input);
    let significant = digits.trim_start_matches('0');
    let padded = format!("{:0>3}", significant);
    let (reais, cents) = padded.split_at(padded.len() - 2);

    format!("R$ {},{}", group_thousands(reais), cents)
}

/// Formats the distance field as an integer with dot separators.
///
/// ## Example
/// ```rust
/// use nextcar_core::format::format_distance;
///
/// assert_eq!(format_distance("45000"), "45.000");
/// assert_eq!(format_distance("007"), "7");
/// ```
pub fn format_distance(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let digits = strip_formatting(input);
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return "0".to_string();
    }

    group_thousands(significant)
}

/// Inventory card label for a stored distance: `12.345 KM`.
pub fn format_km_label(km: i64) -> String {
    let sign = if km < 0 { "-" } else { "" };
    format!("{}{} KM", sign, group_thousands(&km.unsigned_abs().to_string()))
}

/// Inventory card label for a stored price.
///
/// A zero or unusable price renders as `R$ 0,00`.
pub fn format_price_label(preco: f64) -> String {
    Money::from_decimal(preco).to_string()
}

/// Reads the leading integer of a field the way the listing form always has:
/// leading whitespace and an optional sign are accepted, parsing stops at the
/// first non-digit, and text without leading digits reads as zero.
///
/// ## Example
/// ```rust
/// use nextcar_core::format::parse_leading_int;
///
/// assert_eq!(parse_leading_int("ano", " 2020abc").unwrap(), 2020);
/// assert_eq!(parse_leading_int("ano", "abc").unwrap(), 0);
/// ```
pub fn parse_leading_int(field: &str, input: &str) -> Result<i64, ValidationError> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Ok(0);
    }

    let value = digits
        .parse::<i64>()
        .map_err(|_| ValidationError::OutOfRange {
            field: field.to_string(),
            min: i64::MIN,
            max: i64::MAX,
        })?;

    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_formatting() {
        assert_eq!(strip_formatting("R$ 1.234,56"), "123456");
        assert_eq!(strip_formatting("45.000 km"), "45000");
        assert_eq!(strip_formatting("abc"), "");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1.234");
        assert_eq!(group_thousands("1234567"), "1.234.567");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency("123456"), "R$ 1.234,56");
        assert_eq!(format_currency("R$ 1.234,567"), "R$ 12.345,67");
        assert_eq!(format_currency("0"), "R$ 0,00");
        assert_eq!(format_currency("abc"), "R$ 0,00");
        assert_eq!(format_currency(""), "");
    }

    #[test]
    fn test_format_currency_is_exact_for_long_input() {
        let shown = format_currency("123456789012345678901234");
        assert_eq!(shown, "R$ 1.234.567.890.123.456.789.012,34");
    }

    #[test]
    fn test_format_currency_idempotent() {
        for digits in ["1", "12", "123", "1234", "00123", "98765432100", "0"] {
            let once = format_currency(digits);
            let twice = format_currency(&strip_formatting(&once));
            assert_eq!(once, twice, "input {digits}");
            // Feeding the displayed text straight back in is also stable.
            assert_eq!(format_currency(&once), once);
        }
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance("45000"), "45.000");
        assert_eq!(format_distance("45.0001"), "450.001");
        assert_eq!(format_distance("000"), "0");
        assert_eq!(format_distance(""), "");
    }

    #[test]
    fn test_distance_round_trip() {
        for n in [0u64, 7, 999, 1000, 123_456, 9_876_543_210, u64::MAX] {
            let shown = format_distance(&n.to_string());
            assert_eq!(strip_formatting(&shown), n.to_string());
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(format_km_label(12345), "12.345 KM");
        assert_eq!(format_km_label(0), "0 KM");
        assert_eq!(format_price_label(89900.0), "R$ 89.900,00");
        assert_eq!(format_price_label(0.0), "R$ 0,00");
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("ano", "2020").unwrap(), 2020);
        assert_eq!(parse_leading_int("ano", "-5").unwrap(), -5);
        assert_eq!(parse_leading_int("ano", "").unwrap(), 0);
        assert_eq!(parse_leading_int("ano", "20.20").unwrap(), 20);
        assert!(parse_leading_int("km", &"9".repeat(25)).is_err());
    }
}
