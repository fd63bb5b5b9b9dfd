//! # Catalog Service
//!
//! Serves stored products with their derived prices merged in.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Request                                  │
//! │                                                                         │
//! │  list(page?, limit?)                                                   │
//! │       │                                                                 │
//! │       ├── clamp: page ≥ 1, 1 ≤ limit ≤ max_page_size                   │
//! │       │                                                                 │
//! │       ├── as_of = Utc::now()   ◄── read ONCE per request               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRepository::list(page, limit) ──► (products, total)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  for each product: bazaar_core::resolve(input, as_of)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogPage { total, page, totalPages, products: [CatalogProduct] }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every product on a page is priced against the same instant, so a discount
//! expiring mid-request can't apply to half a page.

use bazaar_core::{resolve, CatalogProduct, CoreError, Product};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::CatalogSettings;
use crate::error::DbResult;
use crate::repository::product::ProductRepository;

/// One page of priced products.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    /// Products in the whole catalog.
    pub total: i64,
    /// 1-based page actually served.
    pub page: u32,
    pub total_pages: u64,
    pub products: Vec<CatalogProduct>,
}

/// Read side of the catalog.
#[derive(Debug, Clone)]
pub struct CatalogService {
    products: ProductRepository,
    settings: CatalogSettings,
}

impl CatalogService {
    pub fn new(products: ProductRepository, settings: CatalogSettings) -> Self {
        CatalogService { products, settings }
    }

    /// Lists one page of the catalog, priced as of now.
    pub async fn list(&self, page: Option<u32>, limit: Option<u32>) -> DbResult<CatalogPage> {
        self.list_as_of(page, limit, Utc::now()).await
    }

    /// Lists one page of the catalog, priced as of `as_of`.
    pub async fn list_as_of(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
        as_of: DateTime<Utc>,
    ) -> DbResult<CatalogPage> {
        let (page, limit) = self.clamp(page, limit);

        let (products, total) = self.products.list(page, limit).await?;
        let total_pages = u64::try_from(total).unwrap_or(0).div_ceil(u64::from(limit));

        debug!(page, limit, total, total_pages, "Serving catalog page");

        Ok(CatalogPage {
            total,
            page,
            total_pages,
            products: products
                .into_iter()
                .map(|product| price_product(product, as_of))
                .collect(),
        })
    }

    /// Gets one product, priced as of now.
    pub async fn get(&self, id: &str) -> DbResult<CatalogProduct> {
        self.get_as_of(id, Utc::now()).await
    }

    /// Gets one product, priced as of `as_of`.
    pub async fn get_as_of(&self, id: &str, as_of: DateTime<Utc>) -> DbResult<CatalogProduct> {
        let product = self
            .products
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        Ok(price_product(product, as_of))
    }

    /// Applies defaults and bounds to the requested page and page size.
    pub fn clamp(&self, page: Option<u32>, limit: Option<u32>) -> (u32, u32) {
        let max = self.settings.max_page_size.max(1);
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(self.settings.page_size).clamp(1, max);
        (page, limit)
    }
}

/// Merges the resolved prices into a product.
pub fn price_product(product: Product, as_of: DateTime<Utc>) -> CatalogProduct {
    let pricing = resolve(&product.pricing_input(), as_of);
    CatalogProduct { product, pricing }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::generate_product_id;
    use bazaar_core::{DiscountConfig, Money, Percent, TaxConfig};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 1, 12, 0, 0).unwrap()
    }

    fn settings(page_size: u32, max_page_size: u32) -> CatalogSettings {
        CatalogSettings {
            page_size,
            max_page_size,
        }
    }

    async fn seeded(count: u32, settings: CatalogSettings) -> CatalogService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for i in 0..count {
            let product = Product::new(
                generate_product_id(),
                format!("Product {i}"),
                Money::from_minor(1000),
                now() - Duration::minutes(i64::from(count - i)),
            );
            db.products().insert(&product).await.unwrap();
        }
        db.catalog(settings)
    }

    #[tokio::test]
    async fn test_list_defaults_and_total_pages() {
        let catalog = seeded(25, CatalogSettings::default()).await;

        let page = catalog.list(None, None).await.unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.products.len(), 10);
        assert_eq!(page.products[0].product.title, "Product 24");

        let last = catalog.list(Some(3), None).await.unwrap();
        assert_eq!(last.products.len(), 5);
    }

    #[tokio::test]
    async fn test_list_clamps_page_and_limit() {
        let catalog = seeded(3, settings(2, 5)).await;

        let page = catalog.list(Some(0), Some(0)).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.total_pages, 3);

        let page = catalog.list(None, Some(1000)).await.unwrap();
        assert_eq!(page.products.len(), 3);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let catalog = seeded(0, CatalogSettings::default()).await;
        let page = catalog.list(None, None).await.unwrap();

        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.products.is_empty());
    }

    #[tokio::test]
    async fn test_get_merges_resolved_prices() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = Product::new(generate_product_id(), "Basmati Rice 5kg", Money::from_minor(100_000), now())
            .with_discount(DiscountConfig {
                amount_off: Money::from_minor(50),
                percent_off: Percent::from_whole(10),
                ..Default::default()
            })
            .with_tax(TaxConfig::exclusive(Percent::from_whole(18)));
        db.products().insert(&product).await.unwrap();

        let priced = db
            .catalog(CatalogSettings::default())
            .get_as_of(&product.id, now())
            .await
            .unwrap();

        assert_eq!(priced.product, product);
        assert_eq!(priced.pricing.sale_price.minor(), 90_000);
        assert_eq!(priced.pricing.final_price.minor(), 106_200);
        assert_eq!(priced.pricing.formatted_final_price, "₹1,062.00");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let catalog = seeded(0, CatalogSettings::default()).await;
        assert!(catalog.get("missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_page_priced_at_single_instant() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let expiry = now();
        for (i, title) in ["Early", "Late"].into_iter().enumerate() {
            let product = Product::new(
                generate_product_id(),
                title,
                Money::from_minor(1000),
                now() - Duration::minutes(i as i64),
            )
            .with_discount(DiscountConfig::percentage(Percent::from_whole(50)).expiring_at(expiry));
            db.products().insert(&product).await.unwrap();
        }
        let catalog = db.catalog(CatalogSettings::default());

        let active = catalog.list_as_of(None, None, expiry).await.unwrap();
        assert!(active.products.iter().all(|p| p.pricing.sale_price.minor() == 500));

        let expired = catalog
            .list_as_of(None, None, expiry + Duration::seconds(1))
            .await
            .unwrap();
        assert!(expired.products.iter().all(|p| p.pricing.sale_price.minor() == 1000));
    }

    #[tokio::test]
    async fn test_page_json_shape() {
        let catalog = seeded(1, CatalogSettings::default()).await;
        let json = serde_json::to_value(catalog.list(None, None).await.unwrap()).unwrap();

        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["products"][0]["formattedSalePrice"], "₹10.00");
    }
}
