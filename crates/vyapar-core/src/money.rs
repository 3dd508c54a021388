//! # Money Module
//!
//! Provides the `Money` type for ledger amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a khata in floating point:                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A customer with 300 small udhaar entries drifts by a few paisa and    │
//! │  the balance never settles to exactly zero.                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paisa                                            │
//! │    ₹12.50 is stored as 1250 and every fold is exact                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Backups written by earlier versions of the app store amounts as plain JSON
//! numbers in rupees (`500`, `12.5`). `Money` keeps that contract:
//!
//! | In memory | JSON     |
//! |-----------|----------|
//! | 50000     | `500`    |
//! | 1250      | `12.5`   |
//! | 1999      | `19.99`  |
//!
//! Anything finer than a paisa is rounded on the way in. Amounts beyond
//! [`Money::MAX_PAISA`] are rejected so every stored value survives the trip
//! through an f64 unchanged.
//!
//! ## Usage
//! ```rust
//! use vyapar_core::money::Money;
//!
//! let advance = Money::from_paisa(30_000); // ₹300.00
//! let total = Money::from_rupees(1000);
//! assert_eq!((total - advance).paisa(), 70_000);
//! ```

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paisa (1/100 of a rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: balances go negative when a customer owes the shop
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Custom serde**: rupee numbers on the wire, paisa in memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude accepted from input or a backup (2^53 paisa).
    pub const MAX_PAISA: i64 = 1 << 53;

    /// Creates a Money value from paisa.
    #[inline]
    pub const fn from_paisa(paisa: i64) -> Self {
        Money(paisa)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use vyapar_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(500).paisa(), 50_000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Converts a decimal rupee amount, rounding to the nearest paisa.
    ///
    /// Returns `None` for NaN, infinities and magnitudes above [`Money::MAX_PAISA`].
    pub fn from_decimal(rupees: f64) -> Option<Self> {
        if !rupees.is_finite() {
            return None;
        }

        let paisa = (rupees * 100.0).round();
        if paisa.abs() > Self::MAX_PAISA as f64 {
            return None;
        }

        Some(Money(paisa as i64))
    }

    /// Returns the value as a decimal rupee amount (for the wire and charts).
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in paisa.
    #[inline]
    pub const fn paisa(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paisa portion (always 0-99).
    #[inline]
    pub const fn paisa_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    ///
    /// ## Example
    /// ```rust
    /// use vyapar_core::money::Money;
    ///
    /// let owed = Money::from_paisa(-4_000);
    /// assert_eq!(owed.abs().paisa(), 4_000);
    /// ```
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses user input such as `"500"`, `"12.5"` or `"-40.25"`.
///
/// Parsing is done on the digits directly so `"19.99"` becomes exactly 1999
/// paisa. At most two decimal places are accepted.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("expected a number like 500 or 12.50"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected a number like 500 or 12.50"));
        }
        if frac.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount is too large"))?
        };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("bad decimals"))? * 10,
            _ => frac.parse().map_err(|_| invalid("bad decimals"))?,
        };

        let paisa = whole
            .checked_mul(100)
            .and_then(|p| p.checked_add(frac))
            .filter(|p| *p <= Money::MAX_PAISA)
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -paisa } else { paisa }))
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.to_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rupees = f64::deserialize(deserializer)?;
        Money::from_decimal(rupees)
            .ok_or_else(|| de::Error::custom(format!("amount out of range: {}", rupees)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

// Arithmetic saturates at the i64 bounds. Folding many maximal amounts must
// not panic in debug builds or wrap in release ones.

/// Shows money as `₹1234.50` / `-₹40.00`.
///
/// ## Note
/// Grouping (lakh/crore separators) is a front end concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paisa_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paisa_and_parts() {
        let money = Money::from_paisa(1099);
        assert_eq!(money.paisa(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paisa_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paisa(1099).to_string(), "₹10.99");
        assert_eq!(Money::from_rupees(500).to_string(), "₹500.00");
        assert_eq!(Money::from_paisa(-550).to_string(), "-₹5.50");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_rupees(10);
        let b = Money::from_rupees(4);
        assert_eq!((a + b).paisa(), 1400);
        assert_eq!((a - b).paisa(), 600);
        assert_eq!((-a).paisa(), -1000);

        let total: Money = [a, b, Money::from_paisa(1)].iter().sum();
        assert_eq!(total.paisa(), 1401);
    }

    #[test]
    fn test_from_decimal_rounds_to_paisa() {
        assert_eq!(Money::from_decimal(19.99).map(|m| m.paisa()), Some(1999));
        assert_eq!(Money::from_decimal(0.1 + 0.2).map(|m| m.paisa()), Some(30));
        assert_eq!(Money::from_decimal(12.346).map(|m| m.paisa()), Some(1235));
        assert!(Money::from_decimal(f64::NAN).is_none());
        assert!(Money::from_decimal(f64::INFINITY).is_none());
    }

    #[test]
    fn test_parse() {
        assert_eq!("500".parse::<Money>().unwrap().paisa(), 50_000);
        assert_eq!("12.5".parse::<Money>().unwrap().paisa(), 1250);
        assert_eq!("19.99".parse::<Money>().unwrap().paisa(), 1999);
        assert_eq!(" .75 ".parse::<Money>().unwrap().paisa(), 75);
        assert_eq!("-40.25".parse::<Money>().unwrap().paisa(), -4025);

        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!("1,000".parse::<Money>().is_err());
    }

    #[test]
    fn test_serializes_as_rupee_number() {
        assert_eq!(serde_json::to_string(&Money::from_rupees(500)).unwrap(), "500");
        assert_eq!(serde_json::to_string(&Money::from_paisa(1250)).unwrap(), "12.5");
        assert_eq!(serde_json::to_string(&Money::from_paisa(1999)).unwrap(), "19.99");
        assert_eq!(serde_json::to_string(&Money::from_paisa(-4000)).unwrap(), "-40");
    }

    #[test]
    fn test_deserializes_integers_and_decimals() {
        let m: Money = serde_json::from_str("500").unwrap();
        assert_eq!(m.paisa(), 50_000);

        let m: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(m.paisa(), 1250);

        assert!(serde_json::from_str::<Money>("\"12\"").is_err());
    }

    #[test]
    fn test_rejects_amounts_beyond_max() {
        let max_rupees = Money::MAX_PAISA / 100;
        let m: Money = serde_json::from_str(&max_rupees.to_string()).unwrap();
        assert_eq!(m.paisa(), max_rupees * 100);

        assert!(serde_json::from_str::<Money>("50000000000000000").is_err());
        assert!(serde_json::from_str::<Money>("-1e17").is_err());
        assert!("50000000000000000".parse::<Money>().is_err());
        assert!(Money::from_decimal(1e300).is_none());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_paisa(i64::MAX);
        assert_eq!((max + Money::from_paisa(1)).paisa(), i64::MAX);
        assert_eq!((-max - Money::from_rupees(5)).paisa(), i64::MIN);
        assert_eq!(Money::from_paisa(i64::MIN).abs().paisa(), i64::MAX);

        let total: Money = [max, max, max].iter().sum();
        assert_eq!(total.paisa(), i64::MAX);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_paisa(100).is_positive());
        assert!(Money::from_paisa(-100).is_negative());
        assert_eq!(Money::from_paisa(-100).abs().paisa(), 100);
    }
}
