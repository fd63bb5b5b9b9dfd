//! # bazaar-core: Pure Pricing Logic for Bazaar
//!
//! This crate holds the catalog's domain types and the price resolver. It
//! has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Catalog callers (HTTP layer, seed, tests)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          bazaar-db (SQLite store + CatalogService)              │   │
//! │  │     list/get products, clock read once per request              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Product + as_of                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │  format   │  │   │
//! │  │   │  Product  │  │   Money   │  │  resolve  │  │  ₹1,062   │  │   │
//! │  │   │ Discount  │  │  Percent  │  │ PriceQuote│  │ currency  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, DiscountConfig, TaxConfig, Percent
//! - [`money`] - Money type with integer arithmetic (minor units)
//! - [`currency`] - Supported currencies and their formatting rules
//! - [`format`] - Display formatting (`₹1,00,000.00`, `$1,234.56`)
//! - [`input`] - Lenient JSON to pricing input conversion
//! - [`pricing`] - Sale price, final price, PriceQuote
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: the resolution instant is a parameter, never read here
//! 2. **Integer Money**: all amounts are minor units (i64)
//! 3. **Never Fail**: malformed pricing data resolves with defaults
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::{resolve, Money, Percent, PricingInput, TaxConfig};
//! use chrono::Utc;
//!
//! let input = PricingInput {
//!     base_price: Money::from_minor(150_000),
//!     tax: TaxConfig::exclusive(Percent::from_whole(18)),
//!     ..Default::default()
//! };
//!
//! let quote = resolve(&input, Utc::now());
//! assert_eq!(quote.formatted_final_price, "₹1,770.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod currency;
pub mod error;
pub mod format;
pub mod input;
pub mod money;
pub mod pricing;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use currency::CurrencyCode;
pub use error::{CoreError, CoreResult};
pub use format::format_currency;
pub use input::PricingInput;
pub use money::Money;
pub use pricing::{compute_final_price, compute_sale_price, resolve, PriceQuote};
pub use types::*;
