//! # Money Module
//!
//! Provides the `Money` and `Percent` types for handling monetary values
//! and rates safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  1500.10 × 0.20 = 300.02000000000004  ❌                               │
//! │  Summed over a year of receipts the drift shows up in reports.          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer kuruş                                           │
//! │    150010 × 2000 bps / 10000 = 30002 kuruş, rounded explicitly          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sole_core::money::{Money, Percent};
//!
//! let price = Money::from_cents(150_000); // 1500.00 ₺
//! let vat = price.percentage_of(Percent::from_bps(2000));
//! assert_eq!(vat.cents(), 30_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (kuruş for TRY).
///
/// ## Design Decisions
/// - **i64 (signed)**: profit can be negative, stock corrections can be too
/// - **Single field tuple struct**: serializes as a bare integer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns `rate` of this amount, rounded half away from zero to the
    /// nearest minor unit.
    ///
    /// ## Implementation
    /// `(amount * bps ± 5000) / 10000`, computed in i128 so large
    /// amounts cannot overflow.
    ///
    /// ```rust
    /// use sole_core::money::{Money, Percent};
    ///
    /// // 10.00 at 8.25% = 0.825 → 0.83
    /// let tax = Money::from_cents(1000).percentage_of(Percent::from_bps(825));
    /// assert_eq!(tax.cents(), 83);
    /// ```
    pub fn percentage_of(&self, rate: Percent) -> Money {
        let product = self.0 as i128 * rate.bps() as i128;
        let rounded = if product >= 0 {
            (product + 5000) / 10000
        } else {
            (product - 5000) / 10000
        };
        Money(rounded as i64)
    }

    /// Clamps the amount into `[min, max]`.
    #[inline]
    pub fn clamp(self, min: Money, max: Money) -> Money {
        Money(self.0.clamp(min.0, max.0))
    }
}

/// Debug-style rendering; the UI formats with the configured symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
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
// Percent
// =============================================================================

/// A rate in basis points (1 bps = 0.01%, 2000 bps = 20%).
///
/// Used for the VAT rate, percentage discounts and the staff discount cap.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Percent(u32);

impl Percent {
    /// One hundred percent.
    pub const FULL: Percent = Percent(10_000);

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percent(bps)
    }

    /// Creates a rate from a whole percentage such as `20`.
    #[inline]
    pub const fn from_whole(pct: u32) -> Self {
        Percent(pct * 100)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "%{}", self.0 / 100)
        } else {
            write!(f, "%{}.{:02}", self.0 / 100, self.0 % 100)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_parts() {
        let money = Money::from_cents(150_099);
        assert_eq!(money.major(), 1500);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_percentage_of_exact() {
        // 200.00 at 20% = 40.00
        let vat = Money::from_cents(20_000).percentage_of(Percent::from_whole(20));
        assert_eq!(vat.cents(), 4_000);
    }

    #[test]
    fn test_percentage_of_rounds_half_away_from_zero() {
        assert_eq!(Money::from_cents(1000).percentage_of(Percent::from_bps(825)).cents(), 83);
        assert_eq!(Money::from_cents(-1000).percentage_of(Percent::from_bps(825)).cents(), -83);
        assert_eq!(Money::from_cents(1).percentage_of(Percent::from_bps(4999)).cents(), 0);
    }

    #[test]
    fn test_clamp() {
        let cap = Money::from_cents(500);
        assert_eq!(Money::from_cents(900).clamp(Money::zero(), cap), cap);
        assert_eq!(Money::from_cents(-1).clamp(Money::zero(), cap), Money::zero());
    }

    #[test]
    fn test_percent_conversions() {
        assert_eq!(Percent::from_whole(20).bps(), 2000);
        assert_eq!(Percent::from_whole(20).to_string(), "%20");
        assert_eq!(Percent::from_bps(825).to_string(), "%8.25");
    }

    #[test]
    fn test_money_serializes_as_integer() {
        let json = serde_json::to_string(&Money::from_cents(1234)).unwrap();
        assert_eq!(json, "1234");
        let back: Percent = serde_json::from_str("2000").unwrap();
        assert_eq!(back, Percent::from_whole(20));
    }
}
