//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Cents                                        │
//! │    All amounts are i64 minor units; only formatting and the         │
//! │    receipt parser ever touch a decimal point.                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Receipts render amounts to two decimals and are later parsed back, so
//! `Money` also carries its own text round-trip: [`Money::format_plain`]
//! produces the `X.YY` cell used in the product table and
//! [`Money::parse_str`] accepts both `.` and `,` as decimal separator plus
//! an optional leading `$` (the "TOTALES" section prefixes amounts).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: room for corrections and large peso amounts
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
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

    /// Calculates tax for this amount.
    ///
    /// Integer math with half-up rounding on the last digit:
    /// `(amount_cents * bps + 5000) / 10000`. i128 intermediates prevent
    /// overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use caja_core::money::Money;
    /// use caja_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(10_000); // 100.00
    /// let tax = subtotal.tax(TaxRate::from_bps(1900)); // 19%
    /// assert_eq!(tax.cents(), 1_900); // 19.00
    /// ```
    pub fn tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity, or `None` when the product does not
    /// fit in `i64` cents.
    ///
    /// Quantities come from parsed receipt text as well as operator input,
    /// so the multiply must not be able to panic or wrap.
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds, clamping at the representable range instead of wrapping.
    #[inline]
    pub const fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Formats the amount as `X.YY` with no currency symbol.
    ///
    /// This is the exact cell format of the receipt product table; the
    /// parser recovers unit prices from it.
    pub fn format_plain(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }

    /// Parses an amount from receipt text.
    ///
    /// Accepts an optional leading `$`, and `,` as an alternative decimal
    /// separator (historical receipts used the comma convention). Returns
    /// `None` for anything that is not a plain decimal number; the caller
    /// decides whether that is worth logging.
    pub fn parse_str(text: &str) -> Option<Money> {
        let text = text.trim().trim_start_matches('$').replace(',', ".");
        if text.is_empty() {
            return None;
        }

        let (major_str, minor_str) = match text.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (text.as_str(), ""),
        };

        let negative = major_str.starts_with('-');
        let major_digits = major_str.strip_prefix('-').unwrap_or(major_str);
        if major_digits.is_empty() || !major_digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if !minor_str.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let major: i64 = major_digits.parse().ok()?;
        // Two decimals on the wire; a single digit means tenths.
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().ok()? * 10,
            _ => minor_str[..2].parse().ok()?,
        };

        let cents = major * 100 + minor;
        Some(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the `$X.YY` form used by the receipt "TOTALES" section.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

/// Default money is zero.
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
