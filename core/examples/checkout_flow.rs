// core/examples/checkout_flow.rs

use std::sync::Arc;

use stockroom::{
  CheckoutEngine, CheckoutError, Customer, LineItem, MemoryStore, NewProduct, OrderProposal, Store,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::INFO)
    .init();

  info!("--- Checkout Flow Example ---");

  // 1. Build a store and seed the catalog.
  let store = Arc::new(MemoryStore::new());
  let shirt = store
    .insert_product(NewProduct {
      name: "Linen Shirt".to_string(),
      description: Some("Relaxed fit, breathable weave.".to_string()),
      category: "apparel".to_string(),
      price_cents: 4500,
      stock: 3,
      sizes: vec!["S".to_string(), "M".to_string(), "L".to_string()],
      image_url: None,
    })
    .await?;

  // 2. Create the engine over the store handle.
  let engine = CheckoutEngine::new(store.clone());

  let customer = Customer {
    name: "Ada Lovelace".to_string(),
    email: "ada@example.com".to_string(),
    mobile: None,
    address: None,
  };

  // 3. A satisfiable order: two of three units.
  let order_id = engine
    .place_order(OrderProposal {
      customer: customer.clone(),
      items: vec![LineItem {
        product_id: shirt.id,
        name: shirt.name.clone(),
        unit_price_cents: shirt.price_cents,
        quantity: 2,
        size: Some("M".to_string()),
      }],
      total_cents: shirt.price_cents * 2,
    })
    .await?;
  info!("order {order_id} committed");

  let remaining = store.fetch_product(shirt.id).await?.expect("still listed");
  info!("stock after checkout: {}", remaining.stock);
  assert_eq!(remaining.stock, 1);

  // 4. An unsatisfiable order: two more units when only one is left. The
  //    failure names the product and what is actually available, and the
  //    store is left exactly as it was.
  let err = engine
    .place_order(OrderProposal {
      customer,
      items: vec![LineItem {
        product_id: shirt.id,
        name: shirt.name.clone(),
        unit_price_cents: shirt.price_cents,
        quantity: 2,
        size: Some("M".to_string()),
      }],
      total_cents: shirt.price_cents * 2,
    })
    .await
    .expect_err("only one unit left");
  match &err {
    CheckoutError::InsufficientStock {
      requested,
      available,
      ..
    } => info!("rejected as expected: requested {requested}, available {available}"),
    other => anyhow::bail!("unexpected error: {other}"),
  }

  let untouched = store.fetch_product(shirt.id).await?.expect("still listed");
  assert_eq!(untouched.stock, 1);
  assert_eq!(store.list_orders().await?.len(), 1);
  info!("store unchanged by the failed attempt");

  Ok(())
}
