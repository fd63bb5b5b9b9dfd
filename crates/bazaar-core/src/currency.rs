//! # Currency Module
//!
//! The fixed set of currencies the catalog supports, and the explicit
//! formatting rule for each one.
//!
//! ## Formatting Table
//! ```text
//! ┌──────────┬──────────┬──────────────────┬──────────┬──────────────────┐
//! │ Code     │ Symbol   │ Grouping         │ Decimals │ Example          │
//! ├──────────┼──────────┼──────────────────┼──────────┼──────────────────┤
//! │ INR      │ ₹        │ Indian (3, 2, 2) │ 2        │ ₹1,00,000.00     │
//! │ USD      │ $        │ Western (3)      │ 2        │ $100,000.00      │
//! │ EUR      │ €        │ Western (3)      │ 2        │ €100,000.00      │
//! │ GBP      │ £        │ Western (3)      │ 2        │ £100,000.00      │
//! │ AED      │ "AED "   │ Western (3)      │ 2        │ AED 100,000.00   │
//! └──────────┴──────────┴──────────────────┴──────────┴──────────────────┘
//! ```
//!
//! Codes outside this set are never rejected: [`CurrencyCode::coalesce`]
//! substitutes the default (INR) for formatting while the stored code stays
//! untouched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

// =============================================================================
// Currency Code
// =============================================================================

/// ISO 4217 currency codes accepted by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    /// Indian Rupee (default).
    #[default]
    Inr,
    /// US Dollar.
    Usd,
    /// Euro.
    Eur,
    /// Pound Sterling.
    Gbp,
    /// UAE Dirham.
    Aed,
}

impl CurrencyCode {
    /// All supported codes, in display order.
    pub const ALL: [CurrencyCode; 5] = [
        CurrencyCode::Inr,
        CurrencyCode::Usd,
        CurrencyCode::Eur,
        CurrencyCode::Gbp,
        CurrencyCode::Aed,
    ];

    /// Returns the three-letter ISO code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Inr => "INR",
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Aed => "AED",
        }
    }

    /// Resolves a possibly missing or unsupported code, falling back to INR.
    ///
    /// Matching ignores surrounding whitespace and letter case, the same way
    /// the product model upper-cases codes on save.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::currency::CurrencyCode;
    ///
    /// assert_eq!(CurrencyCode::coalesce(Some(" usd ")), CurrencyCode::Usd);
    /// assert_eq!(CurrencyCode::coalesce(Some("ZZZ")), CurrencyCode::Inr);
    /// assert_eq!(CurrencyCode::coalesce(None), CurrencyCode::Inr);
    /// ```
    pub fn coalesce(raw: Option<&str>) -> Self {
        raw.and_then(|code| code.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the supported codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported currency code: '{0}'")]
pub struct UnsupportedCurrency(pub String);

impl FromStr for CurrencyCode {
    type Err = UnsupportedCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        CurrencyCode::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnsupportedCurrency(code.to_string()))
    }
}

// =============================================================================
// Formatting Rules
// =============================================================================

/// How integer digits are grouped with separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Last three digits, then groups of two: `1,00,00,000`.
    Indian,
    /// Groups of three: `10,000,000`.
    Western,
}

/// Display rule for one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRule {
    /// Text placed directly before the number.
    pub symbol: &'static str,
    /// Digit grouping convention.
    pub grouping: Grouping,
    /// Fraction digits shown. Always 2 for the supported set.
    pub fraction_digits: u32,
}

/// The formatting table. Lookups go through [`rule_for`].
static FORMAT_RULES: [(CurrencyCode, FormatRule); 5] = [
    (
        CurrencyCode::Inr,
        FormatRule {
            symbol: "₹",
            grouping: Grouping::Indian,
            fraction_digits: 2,
        },
    ),
    (
        CurrencyCode::Usd,
        FormatRule {
            symbol: "$",
            grouping: Grouping::Western,
            fraction_digits: 2,
        },
    ),
    (
        CurrencyCode::Eur,
        FormatRule {
            symbol: "€",
            grouping: Grouping::Western,
            fraction_digits: 2,
        },
    ),
    (
        CurrencyCode::Gbp,
        FormatRule {
            symbol: "£",
            grouping: Grouping::Western,
            fraction_digits: 2,
        },
    ),
    (
        CurrencyCode::Aed,
        FormatRule {
            symbol: "AED ",
            grouping: Grouping::Western,
            fraction_digits: 2,
        },
    ),
];

/// Looks up the formatting rule for a currency.
///
/// Returns `None` if the table has no entry; callers fall back to the plain
/// `"<CODE> <amount>"` rendering.
pub fn rule_for(code: CurrencyCode) -> Option<&'static FormatRule> {
    FORMAT_RULES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, rule)| rule)
}
