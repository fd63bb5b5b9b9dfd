//! # Repository Module
//!
//! Database repository implementations for Bazaar.
//!
//! ## Repository Pattern
//! ```text
//! CatalogService / seed
//!      │
//!      │  db.products().list(1, 10)
//!      ▼
//! ProductRepository
//! ├── insert(&self, product)
//! ├── get_by_id(&self, id)
//! ├── find_by_title(&self, title)
//! ├── list(&self, page, limit)
//! ├── update(&self, product)
//! ├── delete(&self, id)
//! └── count(&self)
//!      │
//!      │  SQL
//!      ▼
//! SQLite Database
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product CRUD and pagination

pub mod product;
