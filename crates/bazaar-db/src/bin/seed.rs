//! # Seed Data Generator
//!
//! Populates the catalog with demo products for development.
//!
//! ## Usage
//! ```bash
//! # Use bazaar.toml / BAZAAR_* / defaults
//! cargo run -p bazaar-db --bin seed
//!
//! # Specify database path
//! cargo run -p bazaar-db --bin seed -- --db ./data/bazaar.db
//!
//! # Specify config file
//! cargo run -p bazaar-db --bin seed -- --config ./bazaar.toml
//! ```
//!
//! ## Generated Products
//! One product per pricing shape the resolver handles:
//! - percent vs flat discounts (larger wins)
//! - expired discounts
//! - tax included vs added on top
//! - every supported currency, plus one unsupported code

use bazaar_core::{DiscountConfig, Money, Percent, Product, TaxConfig};
use bazaar_db::{generate_product_id, CatalogConfig, Database};
use chrono::{Duration, Utc};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Demo catalog: (title, base minor units, currency, discount, tax).
fn demo_catalog() -> Vec<(&'static str, i64, &'static str, DiscountConfig, TaxConfig)> {
    let now = Utc::now();
    let gst = |rate| TaxConfig::exclusive(Percent::from_whole(rate));
    let vat = |rate| TaxConfig::inclusive(Percent::from_whole(rate));

    vec![
        (
            "Basmati Rice 5kg",
            100_000,
            "INR",
            DiscountConfig {
                amount_off: Money::from_minor(50),
                percent_off: Percent::from_whole(10),
                discount_code: Some("DIWALI10".to_string()),
                ..Default::default()
            },
            gst(18),
        ),
        (
            "Handloom Cotton Saree",
            1_250_000,
            "INR",
            DiscountConfig::flat(Money::from_minor(150_000)),
            gst(5),
        ),
        (
            "Brass Diya Set",
            89_900,
            "INR",
            DiscountConfig::percentage(Percent::from_whole(25)).expiring_at(now - Duration::days(3)),
            gst(12),
        ),
        (
            "Kashmiri Saffron 1g",
            45_000,
            "INR",
            DiscountConfig::percentage(Percent::from_whole(15)).expiring_at(now + Duration::days(7)),
            vat(5),
        ),
        (
            "Darjeeling First Flush 100g",
            2_499,
            "USD",
            DiscountConfig::default(),
            gst(0),
        ),
        (
            "Pashmina Shawl",
            18_900,
            "EUR",
            DiscountConfig::flat(Money::from_minor(1_900)),
            vat(20),
        ),
        (
            "Assam Tea Tin 250g",
            1_250,
            "GBP",
            DiscountConfig::percentage(Percent::from_whole(10)),
            vat(20),
        ),
        (
            "Oud Attar 12ml",
            32_000,
            "AED",
            DiscountConfig::default(),
            gst(5),
        ),
        (
            "Neem Wood Comb",
            30_000,
            "JPY",
            DiscountConfig::default(),
            TaxConfig::default(),
        ),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut db_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bazaar Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: platform bazaar.toml)");
                println!("  -d, --db <PATH>      Database file path (overrides config)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let mut config = CatalogConfig::load(config_path)?;
    if db_path.is_some() {
        config.database.path = db_path;
    }

    let database_path = config.database_path();
    if let Some(parent) = database_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    info!(path = %database_path.display(), "Seeding catalog");
    let db = Database::new(config.db_config()).await?;

    let existing = db.products().count().await?;
    if existing > 0 {
        warn!(existing, "Catalog already has products, skipping seed");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let base_time = Utc::now();
    let mut generated = 0;

    for (offset, (title, base, currency, discount, tax)) in demo_catalog().into_iter().enumerate() {
        // Spread creation times so newest-first order is stable
        let created_at = base_time - Duration::seconds(i64::try_from(offset).unwrap_or(0));

        let product = Product::new(generate_product_id(), title, Money::from_minor(base), created_at)
            .with_description(format!("{title} from the Bazaar demo catalog"))
            .with_currency(currency)
            .with_stock(10 + 7 * i64::try_from(offset).unwrap_or(0))
            .with_discount(discount)
            .with_tax(tax);

        match db.products().insert(&product).await {
            Ok(_) => generated += 1,
            Err(e) => warn!(title = %product.title, error = %e, "Failed to insert product"),
        }
    }

    info!(generated, elapsed = ?start.elapsed(), "Inserted demo products");

    let page = db.catalog(config.catalog).list(Some(1), None).await?;
    info!(total = page.total, total_pages = page.total_pages, "First catalog page");

    for item in &page.products {
        info!(
            title = %item.product.title,
            base_price = %item.pricing.formatted_base_price,
            sale_price = %item.pricing.formatted_sale_price,
            final_price = %item.pricing.formatted_final_price,
            "Priced product"
        );
    }

    db.close().await;
    info!("Seed complete");

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bazaar_db=trace` - Show trace for the store only
/// - Default: `info,bazaar_db=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bazaar_db=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
