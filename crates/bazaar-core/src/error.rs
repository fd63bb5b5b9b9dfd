//! # Error Types
//!
//! Domain errors for bazaar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bazaar-core errors (this file)                                        │
//! │  └── CoreError        - Catalog domain errors                          │
//! │                                                                         │
//! │  bazaar-db errors (separate crate)                                     │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── ConfigError      - Configuration loading failures                 │
//! │                                                                         │
//! │  Flow: CoreError → DbError → caller                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Price resolution itself has no error type. Malformed pricing data is
//! coerced to defaults, so nothing in [`crate::pricing`] returns `Result`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - Product ID doesn't exist
    /// - Product was deleted
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Another product already uses this title (compared ignoring case).
    #[error("Product title '{0}' already exists")]
    DuplicateTitle(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
