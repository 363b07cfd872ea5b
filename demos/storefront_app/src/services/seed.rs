// demos/storefront_app/src/services/seed.rs
use crate::errors::Result as AppResult;
use stockroom::{MemoryStore, NewProduct, Store};
use tracing::info;

fn demo_products() -> Vec<NewProduct> {
  let apparel = |name: &str, price_cents: i64, stock: u32, sizes: &[&str]| NewProduct {
    name: name.to_string(),
    description: None,
    category: "apparel".to_string(),
    price_cents,
    stock,
    sizes: sizes.iter().map(|s| s.to_string()).collect(),
    image_url: Some("https://placehold.co/600x600.png".to_string()),
  };

  vec![
    apparel("Linen Shirt", 4500, 12, &["S", "M", "L"]),
    apparel("Wool Scarf", 2900, 8, &[]),
    apparel("Silk Tie", 3900, 15, &[]),
    apparel("Denim Jacket", 9800, 5, &["S", "M", "L", "XL"]),
    apparel("Canvas Tote", 2200, 30, &[]),
    apparel("Leather Belt", 3500, 10, &["32", "34", "36"]),
  ]
}

/// Seeds the demo catalog. Skips entirely when the catalog already has
/// products, so a restart does not duplicate them.
pub async fn seed_catalog(store: &MemoryStore) -> AppResult<u32> {
  if !store.list_products().await?.is_empty() {
    info!("Catalog is not empty, skipping seed to prevent duplicates.");
    return Ok(0);
  }

  let mut count = 0;
  for product in demo_products() {
    store.insert_product(product).await?;
    count += 1;
  }
  Ok(count)
}
