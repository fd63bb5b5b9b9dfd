//! # Price Resolver
//!
//! Derives sale price, final price and display strings from a product's
//! stored pricing configuration.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Price Resolution                                 │
//! │                                                                         │
//! │  base price ₹1,000.00                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_sale_price ◄── discount (expired? → ignored)                  │
//! │       │     flat ₹0.50 vs 10% = ₹100.00  → larger wins                 │
//! │       ▼                                                                 │
//! │  sale price ₹900.00                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_final_price ◄── tax (18%, not included)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  final price ₹1,062.00                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  format_currency × 3 ──► PriceQuote                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - Never fails, never panics on any input
//! - Deterministic: the caller supplies `as_of`, nothing reads the clock
//! - Derived prices are always in `[0, base]` before tax
//!
//! ## Example
//! ```rust
//! use bazaar_core::money::Money;
//! use bazaar_core::pricing::{compute_final_price, compute_sale_price};
//! use bazaar_core::types::{DiscountConfig, Percent, TaxConfig};
//! use chrono::Utc;
//!
//! let discount = DiscountConfig {
//!     amount_off: Money::from_minor(50),
//!     percent_off: Percent::from_whole(10),
//!     ..Default::default()
//! };
//! let sale = compute_sale_price(Money::from_minor(100_000), &discount, Utc::now());
//! assert_eq!(sale.minor(), 90_000);
//!
//! let tax = TaxConfig::exclusive(Percent::from_whole(18));
//! assert_eq!(compute_final_price(sale, &tax).minor(), 106_200);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::format::format_currency;
use crate::input::PricingInput;
use crate::money::Money;
use crate::types::{DiscountConfig, TaxConfig};

// =============================================================================
// Price Quote
// =============================================================================

/// Derived prices for one product, merged into catalog responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Base price after the winning discount, in minor units.
    pub sale_price: Money,
    /// Sale price after tax, in minor units.
    pub final_price: Money,
    pub formatted_base_price: String,
    pub formatted_sale_price: String,
    pub formatted_final_price: String,
}

// =============================================================================
// Operations
// =============================================================================

/// Returns the deduction a discount grants on `base_price` at `as_of`.
///
/// Zero for expired discounts. Otherwise the larger of the flat amount and
/// the rounded percentage, never more than the base price itself.
pub fn discount_amount(base_price: Money, discount: &DiscountConfig, as_of: DateTime<Utc>) -> Money {
    let base = base_price.non_negative();

    if !discount.is_active(as_of) {
        return Money::zero();
    }

    let flat = discount.amount_off.non_negative();
    let proportional = base.percentage(discount.percent_off.sanitized());

    flat.max(proportional).min(base)
}

/// Computes the sale price: base price minus the larger discount, floored at zero.
///
/// ## Rules
/// ```text
/// flat         = amount_off                        (default 0)
/// proportional = round_half_up(base × percent_off / 100)
/// effective    = max(flat, proportional)           (0 if expired)
/// sale         = max(0, base − effective)
/// ```
///
/// Negative inputs are coerced to zero. An expired discount (its
/// `valid_until` strictly before `as_of`) deducts nothing.
pub fn compute_sale_price(base_price: Money, discount: &DiscountConfig, as_of: DateTime<Utc>) -> Money {
    let base = base_price.non_negative();
    base.deduct(discount_amount(base, discount, as_of))
}

/// Computes the final price from the sale price and tax configuration.
///
/// ## Rules
/// - Tax included in price → unchanged
/// - Rate above zero → `round_half_up(sale × (100 + rate) / 100)`
/// - Otherwise → unchanged
pub fn compute_final_price(sale_price: Money, tax: &TaxConfig) -> Money {
    let sale = sale_price.non_negative();
    let rate = tax.rate.sanitized();

    if tax.included_in_price || rate.is_zero() {
        return sale;
    }

    sale.add_percentage(rate)
}

/// Resolves every derived price field for one product.
///
/// ## Example
/// ```rust
/// use bazaar_core::input::PricingInput;
/// use bazaar_core::pricing::resolve;
/// use chrono::Utc;
///
/// let input: PricingInput = serde_json::from_str(r#"{
///     "basePrice": 100000,
///     "discount": { "amountOff": 50, "percentOff": 10 },
///     "tax": { "rate": 18, "includedInPrice": false },
///     "currency": "INR"
/// }"#).unwrap();
///
/// let quote = resolve(&input, Utc::now());
/// assert_eq!(quote.sale_price.minor(), 90_000);
/// assert_eq!(quote.final_price.minor(), 106_200);
/// assert_eq!(quote.formatted_final_price, "₹1,062.00");
/// ```
pub fn resolve(input: &PricingInput, as_of: DateTime<Utc>) -> PriceQuote {
    let base = input.base_price.non_negative();
    let sale = compute_sale_price(base, &input.discount, as_of);
    let final_price = compute_final_price(sale, &input.tax);

    PriceQuote {
        sale_price: sale,
        final_price,
        formatted_base_price: format_currency(base, &input.currency),
        formatted_sale_price: format_currency(sale, &input.currency),
        formatted_final_price: format_currency(final_price, &input.currency),
    }
}

impl PriceQuote {
    /// Checks if a discount lowered the price (storefront "SALE" badge).
    pub fn is_on_sale(&self, base_price: Money) -> bool {
        self.sale_price < base_price.non_negative()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
