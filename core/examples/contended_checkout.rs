// core/examples/contended_checkout.rs

use std::sync::Arc;

use stockroom::{
  CheckoutEngine, Customer, LineItem, MemoryStore, NewProduct, OrderProposal, Product, Store,
};
use tracing::info;

fn single_unit_proposal(product: &Product, buyer: &str) -> OrderProposal {
  OrderProposal {
    customer: Customer {
      name: buyer.to_string(),
      email: format!("{}@example.com", buyer.to_lowercase()),
      mobile: None,
      address: None,
    },
    items: vec![LineItem {
      product_id: product.id,
      name: product.name.clone(),
      unit_price_cents: product.price_cents,
      quantity: 1,
      size: None,
    }],
    total_cents: product.price_cents,
  }
}

/// Two buyers race for the last unit. Exactly one wins; the other is told
/// precisely why it lost, and the shelf never goes negative.
#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::INFO)
    .init();

  info!("--- Contended Checkout Example ---");

  let store = Arc::new(MemoryStore::new());
  let scarf = store
    .insert_product(NewProduct {
      name: "Wool Scarf".to_string(),
      description: None,
      category: "apparel".to_string(),
      price_cents: 2900,
      stock: 1,
      sizes: Vec::new(),
      image_url: None,
    })
    .await?;

  let engine = Arc::new(CheckoutEngine::new(store.clone()));

  let first = {
    let engine = engine.clone();
    let proposal = single_unit_proposal(&scarf, "Ada");
    tokio::spawn(async move { engine.place_order(proposal).await })
  };
  let second = {
    let engine = engine.clone();
    let proposal = single_unit_proposal(&scarf, "Grace");
    tokio::spawn(async move { engine.place_order(proposal).await })
  };

  let outcomes = [first.await?, second.await?];
  for (buyer, outcome) in ["Ada", "Grace"].iter().zip(&outcomes) {
    match outcome {
      Ok(order_id) => info!("{buyer} won the last unit: order {order_id}"),
      Err(err) => info!("{buyer} lost the race: {err}"),
    }
  }

  let winners = outcomes.iter().filter(|o| o.is_ok()).count();
  assert_eq!(winners, 1, "the last unit can only be sold once");

  let shelf = store.fetch_product(scarf.id).await?.expect("still listed");
  assert_eq!(shelf.stock, 0);
  info!("final stock: {}", shelf.stock);

  Ok(())
}
