//! # Currency Formatting
//!
//! Turns minor-unit amounts into the display strings the storefront shows.
//!
//! ## Flow
//! ```text
//! format_currency(10000000, "INR")
//!      │
//!      ├── coalesce code ──► CurrencyCode::Inr   (unknown/missing → INR)
//!      │
//!      ├── rule_for(Inr) ──► ₹, Indian grouping, 2 decimals
//!      │        │
//!      │        └── no rule? ──► "INR 100000.00"   (plain fallback)
//!      │
//!      ▼
//!   "₹1,00,000.00"
//! ```
//!
//! Formatting never fails. There is no locale lookup at runtime, only the
//! table in [`crate::currency`].

use crate::currency::{rule_for, CurrencyCode, FormatRule, Grouping};
use crate::money::{Money, MINOR_PER_MAJOR};

/// Formats an amount for display in the given currency code.
///
/// Absent, unknown or malformed codes are formatted as INR.
///
/// ## Example
/// ```rust
/// use bazaar_core::format::format_currency;
/// use bazaar_core::money::Money;
///
/// assert_eq!(format_currency(Money::from_minor(150_000), "INR"), "₹1,500.00");
/// assert_eq!(format_currency(Money::from_minor(10_000_000), "INR"), "₹1,00,000.00");
/// assert_eq!(format_currency(Money::from_minor(123_456), "USD"), "$1,234.56");
/// assert_eq!(format_currency(Money::from_minor(500), "ZZZ"), "₹5.00");
/// ```
pub fn format_currency(amount: Money, currency: &str) -> String {
    format_money(amount, CurrencyCode::coalesce(Some(currency)))
}

/// Formats an amount with the rule registered for `code`.
///
/// Falls back to [`format_plain`] when the table has no rule for the code.
pub fn format_money(amount: Money, code: CurrencyCode) -> String {
    match rule_for(code) {
        Some(rule) => apply_rule(amount, rule),
        None => format_plain(amount, code.as_str()),
    }
}

/// Plain `"<CODE> <amount>"` rendering with two decimals and no grouping.
///
/// ## Example
/// ```rust
/// use bazaar_core::format::format_plain;
/// use bazaar_core::money::Money;
///
/// assert_eq!(format_plain(Money::from_minor(150_000), "INR"), "INR 1500.00");
/// ```
pub fn format_plain(amount: Money, code: &str) -> String {
    format!("{} {}", code, amount)
}

fn apply_rule(amount: Money, rule: &FormatRule) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    let magnitude = amount.minor().unsigned_abs();
    let per_major = MINOR_PER_MAJOR.unsigned_abs();

    let whole = group_digits(&(magnitude / per_major).to_string(), rule.grouping);

    if rule.fraction_digits == 0 {
        return format!("{}{}{}", sign, rule.symbol, whole);
    }

    let scale = 10_u64.pow(rule.fraction_digits);
    let fraction = (magnitude % per_major) * scale / per_major;

    format!(
        "{}{}{}.{:0width$}",
        sign,
        rule.symbol,
        whole,
        fraction,
        width = rule.fraction_digits as usize
    )
}

/// Inserts `,` separators into a string of ASCII digits.
fn group_digits(digits: &str, grouping: Grouping) -> String {
    let (first, rest) = match grouping {
        Grouping::Indian => (3, 2),
        Grouping::Western => (3, 3),
    };

    if digits.len() <= first {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - first);

    let mut groups = Vec::with_capacity(head.len() / rest + 2);
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(rest);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);

    groups.join(",")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        let inr = |minor| format_currency(Money::from_minor(minor), "INR");

        assert_eq!(inr(0), "₹0.00");
        assert_eq!(inr(99_900), "₹999.00");
        assert_eq!(inr(150_000), "₹1,500.00");
        assert_eq!(inr(10_000_000), "₹1,00,000.00");
        assert_eq!(inr(1_234_567_89), "₹12,34,567.89");
        assert_eq!(inr(1_000_000_000), "₹1,00,00,000.00");
    }

    #[test]
    fn test_western_grouping() {
        assert_eq!(format_currency(Money::from_minor(10_000_000), "USD"), "$100,000.00");
        assert_eq!(format_currency(Money::from_minor(123_456_789), "EUR"), "€1,234,567.89");
        assert_eq!(format_currency(Money::from_minor(99_999), "GBP"), "£999.99");
        assert_eq!(format_currency(Money::from_minor(150_000), "AED"), "AED 1,500.00");
    }

    #[test]
    fn test_unknown_codes_fall_back_to_inr() {
        assert_eq!(format_currency(Money::from_minor(500), "ZZZ"), "₹5.00");
        assert_eq!(format_currency(Money::from_minor(500), ""), "₹5.00");
        assert_eq!(format_currency(Money::from_minor(500), "usd"), "$5.00");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_currency(Money::from_minor(-150_050), "INR"), "-₹1,500.50");
        assert_eq!(format_currency(Money::from_minor(-5), "USD"), "-$0.05");
    }

    #[test]
    fn test_plain_fallback() {
        assert_eq!(format_plain(Money::from_minor(150_000), "INR"), "INR 1500.00");
        assert_eq!(format_plain(Money::from_minor(7), "ZZZ"), "ZZZ 0.07");
    }

    #[test]
    fn test_rule_without_fraction_digits() {
        let rule = FormatRule {
            symbol: "¤",
            grouping: Grouping::Western,
            fraction_digits: 0,
        };
        assert_eq!(apply_rule(Money::from_minor(123_456_78), &rule), "¤123,456");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1", Grouping::Indian), "1");
        assert_eq!(group_digits("999", Grouping::Indian), "999");
        assert_eq!(group_digits("1000", Grouping::Indian), "1,000");
        assert_eq!(group_digits("100000", Grouping::Indian), "1,00,000");
        assert_eq!(group_digits("1000000", Grouping::Western), "1,000,000");
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let amount = Money::from_minor(106_200);
        assert_eq!(format_currency(amount, "INR"), format_currency(amount, "INR"));
    }
}
