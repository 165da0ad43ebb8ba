//! Money type for representing prices and totals.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues in running cart totals. The storefront trades in a
//! single currency, so no currency tag is carried.
//!
//! Arithmetic saturates at the `i64` bounds: cart operations are total
//! functions and must not panic on extreme input.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

use crate::error::CommerceError;

const CENTS_PER_UNIT: i64 = 100;

/// A monetary value in cents.
///
/// Serializes as a decimal number of dollars (`22.99`), matching the
/// catalog and action file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    /// Amount in cents. May be negative.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Zero.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Create a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// Non-finite input maps to zero and out-of-range input saturates.
    /// Use [`Money::try_from_decimal`] to reject those instead.
    ///
    /// ```
    /// use qeirex_commerce::Money;
    /// let price = Money::from_decimal(22.99);
    /// assert_eq!(price.amount_cents, 2299);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        // `as` saturates for out-of-range floats and maps NaN to zero.
        Self::new((amount * CENTS_PER_UNIT as f64).round() as i64)
    }

    /// Create a Money value from a decimal amount, rejecting NaN and infinities.
    pub fn try_from_decimal(amount: f64) -> Result<Self, CommerceError> {
        if !amount.is_finite() {
            return Err(CommerceError::NonFinitePrice);
        }
        Ok(Self::from_decimal(amount))
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / CENTS_PER_UNIT as f64
    }

    /// Format as a display string (e.g., "$22.99").
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}${}", sign, self.display_amount_abs())
    }

    /// Format as a display string without symbol (e.g., "22.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}", sign, self.display_amount_abs())
    }

    fn display_amount_abs(&self) -> String {
        let abs = self.amount_cents.unsigned_abs();
        let unit = CENTS_PER_UNIT as u64;
        format!("{}.{:02}", abs / unit, abs % unit)
    }

    /// Multiply by a quantity, saturating on overflow.
    pub fn times(&self, quantity: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(quantity))
    }

    /// Subtract, clamping the result at zero.
    pub fn saturating_sub_to_zero(&self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_sub(other.amount_cents).max(0))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_sub(other.amount_cents))
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.times(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::try_from_decimal(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(22.99).amount_cents, 2299);
        assert_eq!(Money::from_decimal(0.1 + 0.2).amount_cents, 30);
        assert_eq!(Money::from_decimal(-5.0).amount_cents, -500);
    }

    #[test]
    fn test_try_from_decimal_rejects_nan() {
        assert!(Money::try_from_decimal(f64::NAN).is_err());
        assert!(Money::try_from_decimal(f64::INFINITY).is_err());
        assert!(Money::try_from_decimal(10.0).is_ok());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4598).display(), "$45.98");
        assert_eq!(Money::new(5).display(), "$0.05");
        assert_eq!(Money::new(-1250).display(), "-$12.50");
        assert_eq!(Money::new(2000).display_amount(), "20.00");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(1000);
        let b = Money::new(500);
        assert_eq!((a + b).amount_cents, 1500);
        assert_eq!((a - b).amount_cents, 500);
        assert_eq!((a * 3).amount_cents, 3000);
        assert_eq!(b.saturating_sub_to_zero(a), Money::zero());
    }

    #[test]
    fn test_money_saturates() {
        let big = Money::new(i64::MAX);
        assert_eq!((big + Money::new(1)).amount_cents, i64::MAX);
        assert_eq!(big.times(2).amount_cents, i64::MAX);
    }

    #[test]
    fn test_money_sum() {
        let total: Money = [Money::new(100), Money::new(250)].into_iter().sum();
        assert_eq!(total.amount_cents, 350);
    }

    #[test]
    fn test_money_serde_as_decimal() {
        let json = serde_json::to_string(&Money::new(2299)).unwrap();
        assert_eq!(json, "22.99");
        let back: Money = serde_json::from_str("31.99").unwrap();
        assert_eq!(back.amount_cents, 3199);
    }
}
