//! # Domain Types
//!
//! Pricing configuration and product types used throughout Bazaar.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ DiscountConfig  │   │   TaxConfig     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │──►│  amount_off     │   │  rate (0-100)   │       │
//! │  │  title          │   │  percent_off    │   │  included_in_   │       │
//! │  │  base_price     │   │  valid_until    │   │    price        │       │
//! │  │  currency       │──►│  discount_code  │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘            ▲                │
//! │           │                                           │                │
//! │           └───────────────────────────────────────────┘                │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Percent      │   │ CatalogProduct  │                             │
//! │  │  whole 0..=100  │   │ Product + quote │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A product owns its discount and tax configuration by value. Nothing is
//! shared between products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::currency::CurrencyCode;
use crate::input::PricingInput;
use crate::money::Money;
use crate::pricing::PriceQuote;

// =============================================================================
// Percent
// =============================================================================

/// A whole-number percentage ("10% off", "18% GST"), used for both discount
/// and tax rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percent(u8);

impl Percent {
    /// Largest valid percentage.
    pub const MAX: u8 = 100;

    /// Creates a percentage, clamping anything above 100 to 100.
    #[inline]
    pub const fn from_whole(pct: u8) -> Self {
        if pct > Self::MAX {
            Percent(Self::MAX)
        } else {
            Percent(pct)
        }
    }

    /// Coerces an arbitrary integer into a percentage.
    ///
    /// Out-of-range values (negative or above 100) are treated as malformed
    /// and become zero rather than being clamped to the nearest bound.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::types::Percent;
    ///
    /// assert_eq!(Percent::coalesce(18).value(), 18);
    /// assert_eq!(Percent::coalesce(-5).value(), 0);
    /// assert_eq!(Percent::coalesce(150).value(), 0);
    /// ```
    pub fn coalesce(raw: i64) -> Self {
        match u8::try_from(raw) {
            Ok(pct) if pct <= Self::MAX => Percent(pct),
            _ => Percent::zero(),
        }
    }

    /// Returns this value if it is within 0..=100, zero otherwise.
    ///
    /// Deserialized records can carry any `u8`; the resolver runs this first.
    #[inline]
    pub const fn sanitized(self) -> Self {
        if self.0 > Self::MAX {
            Percent(0)
        } else {
            self
        }
    }

    /// Returns the whole-number percentage.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// Checks if the percentage is zero.
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

// =============================================================================
// Discount Configuration
// =============================================================================

/// Discount attached to a single product.
///
/// ## Resolution Rule
/// Only the larger of the two mechanisms applies, never both:
/// ```text
/// base ₹1,000.00, amount_off ₹0.50, percent_off 10%
///   flat         =    50 paise
///   proportional = 10000 paise   ◄── larger, applied
///   sale price   = ₹900.00
/// ```
///
/// `amount_off < base price` is enforced by whoever accepts product input,
/// not here. The resolver only guarantees the sale price never goes negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountConfig {
    /// Flat deduction in minor units.
    #[serde(default)]
    pub amount_off: Money,

    /// Proportional deduction in whole percent.
    #[serde(default)]
    pub percent_off: Percent,

    /// Last instant the discount applies. `None` never expires.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub valid_until: Option<DateTime<Utc>>,

    /// Marketing label for the discount. Not resolved against anything.
    #[serde(default)]
    pub discount_code: Option<String>,
}

impl DiscountConfig {
    /// A flat discount with no expiry.
    pub fn flat(amount: Money) -> Self {
        DiscountConfig {
            amount_off: amount,
            ..Default::default()
        }
    }

    /// A percentage discount with no expiry.
    pub fn percentage(pct: Percent) -> Self {
        DiscountConfig {
            percent_off: pct,
            ..Default::default()
        }
    }

    /// Sets the expiry instant.
    pub fn expiring_at(mut self, until: DateTime<Utc>) -> Self {
        self.valid_until = Some(until);
        self
    }

    /// Returns true if the discount still applies at `as_of`.
    ///
    /// The `valid_until` instant itself is still inside the window.
    pub fn is_active(&self, as_of: DateTime<Utc>) -> bool {
        match self.valid_until {
            Some(until) => as_of <= until,
            None => true,
        }
    }

    /// Returns true if neither mechanism deducts anything.
    pub fn is_zero(&self) -> bool {
        self.amount_off.non_negative().is_zero() && self.percent_off.sanitized().is_zero()
    }
}

// =============================================================================
// Tax Configuration
// =============================================================================

/// Tax (GST/VAT) configuration for a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxConfig {
    /// Tax rate in whole percent.
    #[serde(default)]
    pub rate: Percent,

    /// Tax is already folded into the listed price (EU/UK and Indian MRP style).
    #[serde(default)]
    pub included_in_price: bool,
}

impl TaxConfig {
    /// Tax charged on top of the sale price.
    pub fn exclusive(rate: Percent) -> Self {
        TaxConfig {
            rate,
            included_in_price: false,
        }
    }

    /// Tax already contained in the sale price.
    pub fn inclusive(rate: Percent) -> Self {
        TaxConfig {
            rate,
            included_in_price: true,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product as stored.
///
/// Only the base price is persisted. Sale price, final price and display
/// strings are derived on every read via [`Product::pricing_input`] and
/// [`crate::pricing::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display title. Unique across the catalog, ignoring case.
    pub title: String,

    /// Long-form description.
    pub description: String,

    /// Undiscounted, pre-tax price in minor units.
    pub base_price: Money,

    /// ISO 4217 code as stored. Kept verbatim even when unsupported.
    pub currency: String,

    /// Units on hand.
    pub stock: i64,

    /// Discount owned by this product.
    pub discount: DiscountConfig,

    /// Tax configuration owned by this product.
    pub tax: TaxConfig,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates an INR product with no discount, no tax and no stock.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    /// use bazaar_core::types::{Percent, Product, TaxConfig};
    /// use chrono::Utc;
    ///
    /// let product = Product::new("p-1", "Masala Chai 250g", Money::from_minor(24_900), Utc::now())
    ///     .with_tax(TaxConfig::exclusive(Percent::from_whole(5)))
    ///     .with_stock(40);
    ///
    /// assert_eq!(product.currency, "INR");
    /// assert!(product.in_stock(40));
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        base_price: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        Product {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            base_price,
            currency: CurrencyCode::default().as_str().to_string(),
            stock: 0,
            discount: DiscountConfig::default(),
            tax: TaxConfig::default(),
            created_at,
            updated_at: created_at,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the stored currency code, verbatim.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Sets the stock level.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Sets the discount.
    pub fn with_discount(mut self, discount: DiscountConfig) -> Self {
        self.discount = discount;
        self
    }

    /// Sets the tax configuration.
    pub fn with_tax(mut self, tax: TaxConfig) -> Self {
        self.tax = tax;
        self
    }

    /// Returns the currency used for formatting (INR if the stored code is unknown).
    #[inline]
    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::coalesce(Some(&self.currency))
    }

    /// Extracts the fields the price resolver consumes.
    pub fn pricing_input(&self) -> PricingInput {
        PricingInput {
            base_price: self.base_price,
            discount: self.discount.clone(),
            tax: self.tax,
            currency: self.currency.clone(),
        }
    }

    /// Checks if at least `quantity` units are on hand.
    pub fn in_stock(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Catalog Product
// =============================================================================

/// A product with its derived prices merged in, as returned by the catalog.
///
/// ## JSON Shape
/// ```json
/// {
///   "id": "…", "title": "Basmati Rice 5kg", "basePrice": 100000,
///   "currency": "INR", "discount": { … }, "tax": { … },
///   "salePrice": 90000, "finalPrice": 106200,
///   "formattedBasePrice": "₹1,000.00",
///   "formattedSalePrice": "₹900.00",
///   "formattedFinalPrice": "₹1,062.00"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogProduct {
    #[serde(flatten)]
    pub product: Product,

    #[serde(flatten)]
    pub pricing: PriceQuote,
}

// =============================================================================
// Unit Tests
// =============================================================================
