// tests/common/mod.rs
#![allow(dead_code)] // Allow unused helpers in this common test module

use std::sync::Arc;

use once_cell::sync::Lazy;
use stockroom::{
  Address, CheckoutEngine, Customer, LineItem, MemoryStore, NewProduct, OrderProposal, Product,
  Store,
};
use tracing::Level;

// --- Tracing setup (shared across test binaries) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fixture builders ---

pub fn demo_customer() -> Customer {
  Customer {
    name: "Ada Lovelace".to_string(),
    email: "ada@example.com".to_string(),
    mobile: Some("+44 20 7946 0958".to_string()),
    address: Some(Address {
      street: "12 St James's Square".to_string(),
      city: "London".to_string(),
      zip: "SW1Y 4JH".to_string(),
    }),
  }
}

pub fn new_product(name: &str, price_cents: i64, stock: u32) -> NewProduct {
  NewProduct {
    name: name.to_string(),
    description: None,
    category: "apparel".to_string(),
    price_cents,
    stock,
    sizes: Vec::new(),
    image_url: None,
  }
}

pub fn line(product: &Product, quantity: u32) -> LineItem {
  LineItem {
    product_id: product.id,
    name: product.name.clone(),
    unit_price_cents: product.price_cents,
    quantity,
    size: None,
  }
}

/// A single-line proposal with a correctly computed total.
pub fn proposal_for(product: &Product, quantity: u32) -> OrderProposal {
  let item = line(product, quantity);
  let total_cents = item.unit_price_cents * i64::from(quantity);
  OrderProposal {
    customer: demo_customer(),
    items: vec![item],
    total_cents,
  }
}

pub fn proposal_with(items: Vec<LineItem>) -> OrderProposal {
  let total_cents = items
    .iter()
    .map(|i| i.unit_price_cents * i64::from(i.quantity))
    .sum();
  OrderProposal {
    customer: demo_customer(),
    items,
    total_cents,
  }
}

/// Builds a store seeded with `(name, price_cents, stock)` products, in
/// order, returning the committed records.
pub async fn seeded_store(entries: &[(&str, i64, u32)]) -> (Arc<MemoryStore>, Vec<Product>) {
  let store = Arc::new(MemoryStore::new());
  let mut products = Vec::new();
  for (name, price_cents, stock) in entries {
    let product = store
      .insert_product(new_product(name, *price_cents, *stock))
      .await
      .expect("seed insert");
    products.push(product);
  }
  (store, products)
}

pub fn engine(store: &Arc<MemoryStore>) -> CheckoutEngine<MemoryStore> {
  CheckoutEngine::new(store.clone())
}

/// Current stock of a product, read outside any transaction.
pub async fn stock_of(store: &MemoryStore, product: &Product) -> u32 {
  store
    .fetch_product(product.id)
    .await
    .expect("fetch product")
    .expect("product exists")
    .stock
}
