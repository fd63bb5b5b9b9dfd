//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Integer Money
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    ₹999.99 × 0.10 = 99.99900000000001  ❌ WRONG!                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paise, cents)                       │
//! │    99999 paise × 10 / 100 = 9999.9 → 10000 paise (round half up)       │
//! │    The rounding step is explicit and happens exactly once              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::money::Money;
//! use bazaar_core::types::Percent;
//!
//! let base = Money::from_minor(100_000); // ₹1,000.00
//! let ten_off = base.percentage(Percent::from_whole(10));
//! assert_eq!(ten_off.minor(), 10_000);
//!
//! let sale = base.deduct(ten_off);
//! assert_eq!(sale.minor(), 90_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Percent;

/// Number of minor units in one major unit.
///
/// Every supported currency has exactly two decimal places.
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR, cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic stays closed under subtraction; the price
///   resolver clamps its results so derived prices are never negative
/// - **Single field tuple struct**: serializes as a bare JSON integer
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Product.base_price ──► compute_sale_price ──► sale price               │
/// │                                      │                                  │
/// │                                      ▼                                  │
/// │                              compute_final_price ──► final price        │
/// │                                      │                                  │
/// │                                      ▼                                  │
/// │                               format_currency ──► "₹1,062.00"          │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let price = Money::from_minor(150_000); // ₹1,500.00
    /// assert_eq!(price.minor(), 150_000);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from major and minor parts (rupees and paise).
    ///
    /// For negative amounts only the major part carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * MINOR_PER_MAJOR - minor)
        } else {
            Money(major * MINOR_PER_MAJOR + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(106_250).major(), 1062);
    /// assert_eq!(Money::from_minor(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
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
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Clamps negative values to zero.
    #[inline]
    pub fn non_negative(self) -> Self {
        self.max(Money::zero())
    }

    /// Returns `pct` percent of this amount, rounded half up to a whole minor unit.
    ///
    /// ## Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF UP (away from zero)                                     │
    /// │                                                                     │
    /// │  1999 paise × 15% = 299.85 → 300                                    │
    /// │    5 paise  × 10% =   0.5  → 1                                      │
    /// │    4 paise  × 10% =   0.4  → 0                                      │
    /// │                                                                     │
    /// │  Discounts and tax both round this way.                             │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// Integer math in i128: `(amount * pct + 50) / 100`.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    /// use bazaar_core::types::Percent;
    ///
    /// let price = Money::from_minor(1999);
    /// assert_eq!(price.percentage(Percent::from_whole(15)).minor(), 300);
    /// ```
    pub fn percentage(&self, pct: Percent) -> Money {
        const WHOLE: i128 = 100;

        let product = i128::from(self.0) * i128::from(pct.value());
        let rounded = if product >= 0 {
            (product + WHOLE / 2) / WHOLE
        } else {
            (product - WHOLE / 2) / WHOLE
        };
        // |rounded| <= |self|, so it always fits
        Money::from_minor(rounded as i64)
    }

    /// Adds `pct` percent on top of this amount.
    ///
    /// Equivalent to `round(amount × (1 + pct/100))` because the amount is
    /// already a whole number of minor units. Saturates at the i64 bounds.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    /// use bazaar_core::types::Percent;
    ///
    /// let sale = Money::from_minor(90_000);
    /// assert_eq!(sale.add_percentage(Percent::from_whole(18)).minor(), 106_200);
    /// ```
    #[inline]
    pub fn add_percentage(&self, pct: Percent) -> Money {
        Money(self.0.saturating_add(self.percentage(pct).0))
    }

    /// Subtracts `amount`, never going below zero.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let base = Money::from_minor(500);
    /// assert_eq!(base.deduct(Money::from_minor(200)).minor(), 300);
    /// assert_eq!(base.deduct(Money::from_minor(900)).minor(), 0);
    /// ```
    #[inline]
    pub fn deduct(&self, amount: Money) -> Money {
        Money(self.0.saturating_sub(amount.0)).non_negative()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering without currency symbol or digit grouping.
///
/// ## Note
/// This is for logs and debugging. Use [`crate::format::format_currency`]
/// for anything a customer sees.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
