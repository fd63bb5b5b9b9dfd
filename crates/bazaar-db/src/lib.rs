//! # bazaar-db: Product Store for Bazaar
//!
//! SQLite persistence for catalog products, plus the catalog service that
//! serves them with resolved prices.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Data Flow                                 │
//! │                                                                         │
//! │  Caller (HTTP handler, seed binary)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bazaar-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ CatalogService│    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (catalog.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │       │       │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │ resolve(input, as_of)          │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │                        bazaar-core (pure pricing)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - `bazaar.toml` / `BAZAAR_*` configuration
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Product repository
//! - [`catalog`] - Priced catalog pages
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bazaar_db::{CatalogConfig, Database};
//!
//! let config = CatalogConfig::load(None)?;
//! let db = Database::new(config.db_config()).await?;
//!
//! let page = db.catalog(config.catalog).list(Some(1), None).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{CatalogPage, CatalogService};
pub use config::{CatalogConfig, CatalogSettings, ConfigError, DatabaseSettings};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::product::{generate_product_id, ProductRepository};
