//! # Money Module
//!
//! Provides the `Money` type for listing prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The price field is typed digit by digit and read as CENTS:             │
//! │    "123456"  →  123456 centavos  →  R$ 1.234,56                         │
//! │                                                                         │
//! │  The backend wants a float (preco: 1234.56). We keep integer cents     │
//! │  for every step and only produce the float at the wire boundary.       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nextcar_core::money::Money;
//!
//! let price = Money::from_cents(123456);
//! assert_eq!(price.to_string(), "R$ 1.234,56");
//! assert_eq!(price.to_decimal(), 1234.56);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::format::{group_thousands, strip_formatting};

/// Represents a monetary value in centavos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Reads a typed price field: every digit counts, everything else is
    /// formatting. No digits at all means zero.
    ///
    /// ## Example
    /// ```rust
    /// use nextcar_core::money::Money;
    ///
    /// assert_eq!(Money::from_digits("R$ 1.234,56").unwrap().cents(), 123456);
    /// assert_eq!(Money::from_digits("").unwrap().cents(), 0);
    /// ```
    pub fn from_digits(input: &str) -> Result<Self, ValidationError> {
        let digits = strip_formatting(input);
        if digits.is_empty() {
            return Ok(Money::zero());
        }

        digits
            .parse::<i64>()
            .map(Money)
            .map_err(|_| ValidationError::OutOfRange {
                field: "preco".to_string(),
                min: 0,
                max: i64::MAX,
            })
    }

    /// Converts a decimal amount from the backend (e.g. `1234.56`).
    ///
    /// Rounds to the nearest centavo; NaN and infinities become zero.
    pub fn from_decimal(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole reais portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Decimal amount as the backend expects it.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the pt-BR form used on every screen: `R$ 1.234,56`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let reais = self.reais().unsigned_abs().to_string();
        write!(
            f,
            "{}R$ {},{:02}",
            sign,
            group_thousands(&reais),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}
