//! # Product Repository
//!
//! Database operations for catalog products.
//!
//! ## Key Operations
//! - CRUD with case-insensitive unique titles
//! - Newest-first pagination for the catalog
//!
//! ## Row Mapping
//! ```text
//! ┌──────────────────────────── products ────────────────────────────┐
//! │ id │ title │ … │ amount_off │ percent_off │ valid_until │ …      │
//! └──────────────────────────────┬───────────────────────────────────┘
//!                                │ ProductRow (sqlx::FromRow)
//!                                ▼
//!        Product { discount: DiscountConfig, tax: TaxConfig, … }
//! ```
//! Discount and tax are flattened into columns. Out-of-range integers read
//! back from the table are coerced the same way the resolver coerces input.

use bazaar_core::{CoreError, DiscountConfig, Money, Percent, Product, TaxConfig};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

const SELECT_PRODUCT: &str = r#"
    SELECT
        id, title, description, base_price, currency, stock,
        amount_off, percent_off, valid_until, discount_code,
        tax_rate, tax_included,
        created_at, updated_at
    FROM products
"#;

/// One `products` row, as stored.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    title: String,
    description: String,
    base_price: i64,
    currency: String,
    stock: i64,
    amount_off: i64,
    percent_off: i64,
    valid_until: Option<DateTime<Utc>>,
    discount_code: Option<String>,
    tax_rate: i64,
    tax_included: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            title: row.title,
            description: row.description,
            base_price: Money::from_minor(row.base_price),
            currency: row.currency,
            stock: row.stock,
            discount: DiscountConfig {
                amount_off: Money::from_minor(row.amount_off),
                percent_off: Percent::coalesce(row.percent_off),
                valid_until: row.valid_until,
                discount_code: row.discount_code,
            },
            tax: TaxConfig {
                rate: Percent::coalesce(row.tax_rate),
                included_in_price: row.tax_included,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let product = repo.insert(&product).await?;
/// let (page, total) = repo.list(1, 10).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored product
    /// * `Err(DbError::UniqueViolation)` - Title already exists, ignoring case
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(id = %product.id, title = %product.title, "Inserting product");

        if self.find_by_title(&product.title).await?.is_some() {
            return Err(CoreError::DuplicateTitle(product.title.clone()).into());
        }

        sqlx::query(
            r#"
            INSERT INTO products (
                id, title, description, base_price, currency, stock,
                amount_off, percent_off, valid_until, discount_code,
                tax_rate, tax_included,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9, ?10,
                ?11, ?12,
                ?13, ?14
            )
            "#,
        )
        .bind(&product.id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.base_price.minor())
        .bind(&product.currency)
        .bind(product.stock)
        .bind(product.discount.amount_off.minor())
        .bind(i64::from(product.discount.percent_off.value()))
        .bind(product.discount.valid_until)
        .bind(&product.discount.discount_code)
        .bind(i64::from(product.tax.rate.value()))
        .bind(product.tax.included_in_price)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| with_title(e.into(), &product.title))?;

        Ok(product.clone())
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Finds a product by title, ignoring case.
    pub async fn find_by_title(&self, title: &str) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "{SELECT_PRODUCT} WHERE title = ?1 COLLATE NOCASE"
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Lists one page of products, newest first, with the total product count.
    ///
    /// `page` is 1-based. Page 0 is read as page 1.
    pub async fn list(&self, page: u32, limit: u32) -> DbResult<(Vec<Product>, i64)> {
        let offset = i64::from(page.max(1) - 1) * i64::from(limit);

        debug!(page, limit, offset, "Listing products");

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{SELECT_PRODUCT} ORDER BY created_at DESC, rowid DESC LIMIT ?1 OFFSET ?2"
        ))
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = self.count().await?;

        debug!(count = rows.len(), total, "Listed products");
        Ok((rows.into_iter().map(Product::from).collect(), total))
    }

    /// Updates an existing product and stamps `updated_at`.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product as now stored
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    /// * `Err(DbError::UniqueViolation)` - Another product has this title
    pub async fn update(&self, product: &Product) -> DbResult<Product> {
        debug!(id = %product.id, "Updating product");

        if let Some(existing) = self.find_by_title(&product.title).await? {
            if existing.id != product.id {
                return Err(CoreError::DuplicateTitle(product.title.clone()).into());
            }
        }

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                title = ?2,
                description = ?3,
                base_price = ?4,
                currency = ?5,
                stock = ?6,
                amount_off = ?7,
                percent_off = ?8,
                valid_until = ?9,
                discount_code = ?10,
                tax_rate = ?11,
                tax_included = ?12,
                updated_at = ?13
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.base_price.minor())
        .bind(&product.currency)
        .bind(product.stock)
        .bind(product.discount.amount_off.minor())
        .bind(i64::from(product.discount.percent_off.value()))
        .bind(product.discount.valid_until)
        .bind(&product.discount.discount_code)
        .bind(i64::from(product.tax.rate.value()))
        .bind(product.tax.included_in_price)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| with_title(e.into(), &product.title))?;

        if result.rows_affected() == 0 {
            return Err(CoreError::ProductNotFound(product.id.clone()).into());
        }

        let mut updated = product.clone();
        updated.updated_at = now;
        Ok(updated)
    }

    /// Deletes a product permanently and returns what was removed.
    pub async fn delete(&self, id: &str) -> DbResult<Product> {
        debug!(id = %id, "Deleting product");

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            DELETE FROM products
            WHERE id = ?1
            RETURNING
                id, title, description, base_price, currency, stock,
                amount_off, percent_off, valid_until, discount_code,
                tax_rate, tax_included,
                created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::from)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()).into())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Fills in the offending title when SQLite reports the unique index.
fn with_title(err: DbError, title: &str) -> DbError {
    match err {
        DbError::UniqueViolation { field, .. } => DbError::duplicate(field, title),
        other => other,
    }
}

/// Generates a new product ID (UUID v4).
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{Duration, TimeZone};

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 1, 9, minute, 0).unwrap()
    }

    fn product(title: &str, base: i64, created: DateTime<Utc>) -> Product {
        Product::new(generate_product_id(), title, Money::from_minor(base), created)
    }

    async fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let repo = repo().await;
        let expiry = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();

        let original = product("Basmati Rice 5kg", 100_000, at(0))
            .with_description("Aged long grain")
            .with_currency("USD")
            .with_stock(12)
            .with_discount(DiscountConfig {
                amount_off: Money::from_minor(50),
                percent_off: Percent::from_whole(10),
                valid_until: Some(expiry),
                discount_code: Some("DIWALI10".to_string()),
            })
            .with_tax(TaxConfig::exclusive(Percent::from_whole(18)));

        repo.insert(&original).await.unwrap();
        let stored = repo.get_by_id(&original.id).await.unwrap().unwrap();

        assert_eq!(stored, original);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let repo = repo().await;
        assert!(repo.get_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_title_rejected_ignoring_case() {
        let repo = repo().await;
        repo.insert(&product("Masala Chai", 24_900, at(0))).await.unwrap();

        let err = repo
            .insert(&product("MASALA chai", 19_900, at(1)))
            .await
            .unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_title_ignores_case() {
        let repo = repo().await;
        let chai = product("Masala Chai", 24_900, at(0));
        repo.insert(&chai).await.unwrap();

        let found = repo.find_by_title("masala CHAI").await.unwrap().unwrap();
        assert_eq!(found.id, chai.id);
        assert!(repo.find_by_title("Green Tea").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first_with_pagination() {
        let repo = repo().await;
        for minute in 0..5 {
            repo.insert(&product(&format!("Item {minute}"), 1000, at(minute)))
                .await
                .unwrap();
        }

        let (first, total) = repo.list(1, 2).await.unwrap();
        assert_eq!(total, 5);
        let titles: Vec<_> = first.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Item 4", "Item 3"]);

        let (last, _) = repo.list(3, 2).await.unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].title, "Item 0");

        let (beyond, total) = repo.list(9, 2).await.unwrap();
        assert!(beyond.is_empty());
        assert_eq!(total, 5);
    }

    #[tokio::test]
    async fn test_list_page_zero_reads_as_first() {
        let repo = repo().await;
        repo.insert(&product("Only", 1000, at(0))).await.unwrap();

        let (products, _) = repo.list(0, 10).await.unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_update() {
        let repo = repo().await;
        let mut item = product("Ghee 500ml", 60_000, at(0));
        repo.insert(&item).await.unwrap();

        item.base_price = Money::from_minor(55_000);
        item.discount = DiscountConfig::flat(Money::from_minor(5_000));
        let updated = repo.update(&item).await.unwrap();

        assert!(updated.updated_at > at(0));
        let stored = repo.get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(stored.base_price.minor(), 55_000);
        assert_eq!(stored.discount.amount_off.minor(), 5_000);
        assert_eq!(stored.created_at, at(0));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = repo().await;
        let err = repo
            .update(&product("Ghost", 100, at(0)))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_to_taken_title_rejected() {
        let repo = repo().await;
        repo.insert(&product("Jaggery 1kg", 9_000, at(0))).await.unwrap();
        let mut other = product("Honey 500g", 35_000, at(1));
        repo.insert(&other).await.unwrap();

        other.title = "jaggery 1KG".to_string();
        assert!(repo.update(&other).await.unwrap_err().is_duplicate());

        // Keeping its own title is fine
        other.title = "HONEY 500G".to_string();
        assert!(repo.update(&other).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_returns_removed_product() {
        let repo = repo().await;
        let item = product("Cardamom 50g", 32_000, at(0)).with_stock(3);
        repo.insert(&item).await.unwrap();

        let removed = repo.delete(&item.id).await.unwrap();
        assert_eq!(removed, item);
        assert!(repo.get_by_id(&item.id).await.unwrap().is_none());

        assert!(repo.delete(&item.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_out_of_range_columns_are_coerced() {
        let repo = repo().await;
        let item = product("Odd Row", 1000, at(0));
        repo.insert(&item).await.unwrap();

        sqlx::query("UPDATE products SET percent_off = 250, tax_rate = -3 WHERE id = ?1")
            .bind(&item.id)
            .execute(&repo.pool)
            .await
            .unwrap();

        let stored = repo.get_by_id(&item.id).await.unwrap().unwrap();
        assert!(stored.discount.percent_off.is_zero());
        assert!(stored.tax.rate.is_zero());
    }

    #[tokio::test]
    async fn test_expiry_survives_storage() {
        let repo = repo().await;
        let until = at(30) + Duration::milliseconds(250);
        let item = product("Flash Sale", 1000, at(0))
            .with_discount(DiscountConfig::percentage(Percent::from_whole(20)).expiring_at(until));
        repo.insert(&item).await.unwrap();

        let stored = repo.get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(stored.discount.valid_until, Some(until));
    }
}
