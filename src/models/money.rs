//! Money type for representing fine amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point drift when
//! fines are summed or compared. Fractional-day fines are rounded to the cent
//! once, at the point they are computed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use library_cli::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from a fractional number of cents, rounding to
    /// the nearest cent
    pub fn from_fractional_cents(cents: f64) -> Self {
        Self(cents.round() as i64)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.0 < 0 {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(600).to_string(), "$6.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-1250).to_string(), "-$12.50");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(1999).format_with_symbol("€"), "€19.99");
    }

    #[test]
    fn test_from_fractional_cents_rounds() {
        assert_eq!(Money::from_fractional_cents(149.4).cents(), 149);
        assert_eq!(Money::from_fractional_cents(149.6).cents(), 150);
        assert!(Money::from_fractional_cents(0.2).is_zero());
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 5].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 355);
        assert!(total.is_positive());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Money::from_cents(100)).unwrap();
        assert_eq!(json, "100");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::from_cents(100));
    }
}
