//! # Pricing Input
//!
//! The typed input of the price resolver, and the lenient conversion from
//! loosely-typed JSON into it.
//!
//! ## Coercion Rules
//! ```text
//! ┌──────────────────────┬──────────────────────────────┬──────────────────┐
//! │ Field                │ Accepted                     │ Otherwise        │
//! ├──────────────────────┼──────────────────────────────┼──────────────────┤
//! │ basePrice            │ number / numeric string,     │ 0                │
//! │  (basePricePaise)    │ rounded, ≥ 0                 │                  │
//! │ discount.amountOff   │ number / numeric string,     │ 0                │
//! │  (amountOffPaise)    │ rounded, ≥ 0                 │                  │
//! │ discount.percentOff  │ floored, 0..=100             │ 0                │
//! │ discount.validUntil  │ RFC 3339 or YYYY-MM-DD       │ no expiry        │
//! │ tax (gst).rate       │ floored, 0..=100             │ 0                │
//! │ tax.includedInPrice  │ bool, "true" / "false"       │ false            │
//! │ currency             │ any string, trimmed          │ "INR"            │
//! └──────────────────────┴──────────────────────────────┴──────────────────┘
//! ```
//!
//! Conversion never fails. A field that cannot be read is replaced with
//! its default, the same way the resolver treats malformed stored records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::currency::CurrencyCode;
use crate::money::Money;
use crate::types::{DiscountConfig, Percent, TaxConfig};

/// Everything [`crate::pricing::resolve`] needs for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingInput {
    pub base_price: Money,
    pub discount: DiscountConfig,
    pub tax: TaxConfig,
    pub currency: String,
}

impl Default for PricingInput {
    fn default() -> Self {
        PricingInput {
            base_price: Money::zero(),
            discount: DiscountConfig::default(),
            tax: TaxConfig::default(),
            currency: CurrencyCode::default().as_str().to_string(),
        }
    }
}

impl PricingInput {
    /// Builds pricing input from arbitrary JSON, coercing bad fields to defaults.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::input::PricingInput;
    /// use serde_json::json;
    ///
    /// let input = PricingInput::from_value(&json!({
    ///     "basePricePaise": "1999.6",
    ///     "discount": { "amountOffPaise": -10, "percentOff": 12.9 },
    ///     "gst": { "rate": 18, "includedInPrice": "true" },
    ///     "currency": " usd "
    /// }));
    ///
    /// assert_eq!(input.base_price.minor(), 2000);
    /// assert_eq!(input.discount.amount_off.minor(), 0);
    /// assert_eq!(input.discount.percent_off.value(), 12);
    /// assert!(input.tax.included_in_price);
    /// assert_eq!(input.currency, "usd");
    /// ```
    pub fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let root = value.as_object().unwrap_or(&empty);

        let discount = field(root, &["discount"])
            .and_then(Value::as_object)
            .map(discount_from)
            .unwrap_or_default();

        let tax = field(root, &["tax", "gst"])
            .and_then(Value::as_object)
            .map(tax_from)
            .unwrap_or_default();

        let currency = field(root, &["currency"])
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .unwrap_or(CurrencyCode::default().as_str())
            .to_string();

        PricingInput {
            base_price: amount(field(root, &["basePrice", "basePricePaise"])),
            discount,
            tax,
            currency,
        }
    }
}

impl From<Value> for PricingInput {
    fn from(value: Value) -> Self {
        PricingInput::from_value(&value)
    }
}

impl<'de> Deserialize<'de> for PricingInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(PricingInput::from_value(&value))
    }
}

// =============================================================================
// Field Coercion
// =============================================================================

fn discount_from(obj: &Map<String, Value>) -> DiscountConfig {
    DiscountConfig {
        amount_off: amount(field(obj, &["amountOff", "amountOffPaise"])),
        percent_off: percent(field(obj, &["percentOff"])),
        valid_until: field(obj, &["validUntil"]).and_then(timestamp),
        discount_code: field(obj, &["discountCode"])
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string),
    }
}

fn tax_from(obj: &Map<String, Value>) -> TaxConfig {
    TaxConfig {
        rate: percent(field(obj, &["rate"])),
        included_in_price: field(obj, &["includedInPrice"]).map(flag).unwrap_or(false),
    }
}

/// First non-null value found under any of `names`.
fn field<'a>(obj: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| obj.get(*name))
        .find(|value| !value.is_null())
}

/// Finite number from a JSON number or numeric string.
fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn amount(value: Option<&Value>) -> Money {
    match value.and_then(number).map(f64::round) {
        // float-to-int `as` saturates at the i64 bounds
        Some(n) if n > 0.0 => Money::from_minor(n as i64),
        _ => Money::zero(),
    }
}

fn percent(value: Option<&Value>) -> Percent {
    match value.and_then(number).map(f64::floor) {
        Some(n) if (0.0..=f64::from(Percent::MAX)).contains(&n) => Percent::coalesce(n as i64),
        _ => Percent::zero(),
    }
}

fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Parses RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC) or a bare date
/// (midnight UTC).
fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let raw = value.as_str()?.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_well_formed_input() {
        let input = PricingInput::from_value(&json!({
            "basePrice": 100000,
            "discount": {
                "amountOff": 50,
                "percentOff": 10,
                "validUntil": "2024-12-31T23:59:59Z",
                "discountCode": " DIWALI10 "
            },
            "tax": { "rate": 18, "includedInPrice": false },
            "currency": "INR"
        }));

        assert_eq!(input.base_price.minor(), 100_000);
        assert_eq!(input.discount.amount_off.minor(), 50);
        assert_eq!(input.discount.percent_off.value(), 10);
        assert_eq!(
            input.discount.valid_until,
            Some(Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap())
        );
        assert_eq!(input.discount.discount_code.as_deref(), Some("DIWALI10"));
        assert_eq!(input.tax, TaxConfig::exclusive(Percent::from_whole(18)));
        assert_eq!(input.currency, "INR");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let input = PricingInput::from_value(&json!({}));
        assert_eq!(input, PricingInput::default());
        assert_eq!(input.currency, "INR");

        let input = PricingInput::from_value(&json!({ "basePrice": 500, "discount": null }));
        assert_eq!(input.base_price.minor(), 500);
        assert!(input.discount.is_zero());
    }

    #[test]
    fn test_non_object_input_is_all_defaults() {
        assert_eq!(PricingInput::from_value(&json!("nope")), PricingInput::default());
        assert_eq!(PricingInput::from_value(&json!([1, 2])), PricingInput::default());
    }

    #[test]
    fn test_numeric_coercion() {
        let input = PricingInput::from_value(&json!({
            "basePrice": "1500.5",
            "discount": { "amountOff": 49.5, "percentOff": "10.9" }
        }));

        assert_eq!(input.base_price.minor(), 1501);
        assert_eq!(input.discount.amount_off.minor(), 50);
        assert_eq!(input.discount.percent_off.value(), 10);
    }

    #[test]
    fn test_malformed_numbers_become_zero() {
        let input = PricingInput::from_value(&json!({
            "basePrice": -100,
            "discount": { "amountOff": "abc", "percentOff": 150 },
            "tax": { "rate": -5 }
        }));

        assert!(input.base_price.is_zero());
        assert!(input.discount.amount_off.is_zero());
        assert!(input.discount.percent_off.is_zero());
        assert!(input.tax.rate.is_zero());

        let input = PricingInput::from_value(&json!({ "basePrice": true }));
        assert!(input.base_price.is_zero());
    }

    #[test]
    fn test_legacy_field_names() {
        let input = PricingInput::from_value(&json!({
            "basePricePaise": 99900,
            "discount": { "amountOffPaise": 100 },
            "gst": { "rate": 12, "includedInPrice": true }
        }));

        assert_eq!(input.base_price.minor(), 99_900);
        assert_eq!(input.discount.amount_off.minor(), 100);
        assert_eq!(input.tax, TaxConfig::inclusive(Percent::from_whole(12)));
    }

    #[test]
    fn test_current_names_win_over_legacy() {
        let input = PricingInput::from_value(&json!({
            "basePrice": 10,
            "basePricePaise": 20
        }));
        assert_eq!(input.base_price.minor(), 10);
    }

    #[test]
    fn test_valid_until_formats() {
        let parse = |raw: Value| timestamp(&raw);

        assert_eq!(
            parse(json!("2024-06-01T10:00:00+05:30")),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 4, 30, 0).unwrap())
        );
        assert_eq!(
            parse(json!("2024-06-01T10:00:00")),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(
            parse(json!("2024-06-01")),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse(json!("next tuesday")), None);
        assert_eq!(parse(json!(1717236000)), None);
    }

    #[test]
    fn test_included_in_price_flags() {
        assert!(flag(&json!(true)));
        assert!(flag(&json!("TRUE")));
        assert!(!flag(&json!("false")));
        assert!(!flag(&json!("yes")));
        assert!(!flag(&json!(1)));
    }

    #[test]
    fn test_currency_kept_verbatim() {
        let input = PricingInput::from_value(&json!({ "currency": "  zzz " }));
        assert_eq!(input.currency, "zzz");

        let input = PricingInput::from_value(&json!({ "currency": "   " }));
        assert_eq!(input.currency, "INR");
    }

    #[test]
    fn test_deserialize_never_fails_on_objects() {
        let input: PricingInput =
            serde_json::from_str(r#"{"basePrice":"oops","tax":"not an object"}"#).unwrap();
        assert!(input.base_price.is_zero());
        assert_eq!(input.tax, TaxConfig::default());
    }
}
