// tests/admin_tests.rs
mod common;

use std::sync::Arc;

use common::*;
use stockroom::{admin, AdminError, OrderId, OrderStatus, ProductId, Store};

#[tokio::test]
async fn test_order_walks_the_happy_path_to_delivered() {
  setup_tracing();
  let (store, products) = seeded_store(&[("Linen Shirt", 4500, 5)]).await;
  let engine = engine(&store);
  let order_id = engine
    .place_order(proposal_for(&products[0], 1))
    .await
    .unwrap();

  let shipped = admin::update_status(store.as_ref(), order_id, OrderStatus::Shipped)
    .await
    .expect("Processing -> Shipped");
  assert_eq!(shipped.status, OrderStatus::Shipped);

  let delivered = admin::update_status(store.as_ref(), order_id, OrderStatus::Delivered)
    .await
    .expect("Shipped -> Delivered");
  assert_eq!(delivered.status, OrderStatus::Delivered);

  let stored = store.fetch_order(order_id).await.unwrap().unwrap();
  assert_eq!(stored.status, OrderStatus::Delivered);
}

#[tokio::test]
async fn test_illegal_status_moves_are_rejected() {
  setup_tracing();
  let (store, products) = seeded_store(&[("Linen Shirt", 4500, 5)]).await;
  let engine = engine(&store);
  let order_id = engine
    .place_order(proposal_for(&products[0], 1))
    .await
    .unwrap();

  // Processing cannot skip straight to Delivered.
  let err = admin::update_status(store.as_ref(), order_id, OrderStatus::Delivered)
    .await
    .unwrap_err();
  assert!(
    matches!(
      err,
      AdminError::InvalidTransition {
        from: OrderStatus::Processing,
        to: OrderStatus::Delivered,
      }
    ),
    "got {err:?}"
  );

  // Cancelled is terminal.
  admin::update_status(store.as_ref(), order_id, OrderStatus::Cancelled)
    .await
    .expect("Processing -> Cancelled");
  for next in [
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
  ] {
    let err = admin::update_status(store.as_ref(), order_id, next)
      .await
      .unwrap_err();
    assert!(matches!(err, AdminError::InvalidTransition { .. }), "got {err:?}");
  }
}

#[tokio::test]
async fn test_status_update_on_missing_order() {
  setup_tracing();
  let (store, _) = seeded_store(&[]).await;
  let ghost = OrderId::generate();
  let err = admin::update_status(store.as_ref(), ghost, OrderStatus::Shipped)
    .await
    .unwrap_err();
  assert!(matches!(err, AdminError::OrderNotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_cancellation_leaves_stock_untouched() {
  setup_tracing();
  let (store, products) = seeded_store(&[("Linen Shirt", 4500, 5)]).await;
  let engine = engine(&store);
  let order_id = engine
    .place_order(proposal_for(&products[0], 2))
    .await
    .unwrap();
  assert_eq!(stock_of(&store, &products[0]).await, 3);

  admin::update_status(store.as_ref(), order_id, OrderStatus::Cancelled)
    .await
    .unwrap();
  assert_eq!(stock_of(&store, &products[0]).await, 3);
}

#[tokio::test]
async fn test_adjust_stock_in_both_directions() {
  setup_tracing();
  let (store, products) = seeded_store(&[("Wool Scarf", 2900, 3)]).await;

  let restocked = admin::adjust_stock(store.as_ref(), products[0].id, 5)
    .await
    .expect("restock");
  assert_eq!(restocked.stock, 8);

  let corrected = admin::adjust_stock(store.as_ref(), products[0].id, -2)
    .await
    .expect("correction");
  assert_eq!(corrected.stock, 6);
  assert_eq!(stock_of(&store, &products[0]).await, 6);
}

#[tokio::test]
async fn test_adjust_stock_rejects_underflow() {
  setup_tracing();
  let (store, products) = seeded_store(&[("Wool Scarf", 2900, 3)]).await;

  let err = admin::adjust_stock(store.as_ref(), products[0].id, -10)
    .await
    .unwrap_err();
  match err {
    AdminError::StockUnderflow {
      current, delta, ..
    } => {
      assert_eq!(current, 3);
      assert_eq!(delta, -10);
    }
    other => panic!("expected StockUnderflow, got {other:?}"),
  }
  assert_eq!(stock_of(&store, &products[0]).await, 3);
}

#[tokio::test]
async fn test_adjust_stock_on_missing_product() {
  setup_tracing();
  let (store, _) = seeded_store(&[]).await;
  let err = admin::adjust_stock(store.as_ref(), ProductId::generate(), 1)
    .await
    .unwrap_err();
  assert!(matches!(err, AdminError::ProductNotFound { .. }), "got {err:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_restock_racing_checkout_conserves_units() {
  setup_tracing();
  let (store, products) = seeded_store(&[("Linen Shirt", 4500, 5)]).await;
  let product = products[0].clone();
  let engine = Arc::new(engine(&store).with_max_attempts(50));

  let restock = {
    let store = store.clone();
    let id = product.id;
    tokio::spawn(async move { admin::adjust_stock(store.as_ref(), id, 3).await })
  };
  let buyer = {
    let engine = engine.clone();
    let product = product.clone();
    tokio::spawn(async move { engine.place_order(proposal_for(&product, 2)).await })
  };

  restock.await.unwrap().expect("restock");
  buyer.await.unwrap().expect("checkout");

  // 5 + 3 - 2: both effects land exactly once whatever the interleaving.
  assert_eq!(stock_of(&store, &product).await, 6);
}

#[tokio::test]
async fn test_catalog_crud_roundtrip() {
  setup_tracing();
  let (store, _) = seeded_store(&[]).await;

  let product = store
    .insert_product(new_product("Silk Tie", 3900, 7))
    .await
    .unwrap();
  let fetched = store.fetch_product(product.id).await.unwrap();
  assert_eq!(fetched.as_ref(), Some(&product));

  assert!(store.delete_product(product.id).await.unwrap());
  assert_eq!(store.fetch_product(product.id).await.unwrap(), None);
  assert!(!store.delete_product(product.id).await.unwrap());
}

#[tokio::test]
async fn test_product_listing_is_name_ordered() {
  setup_tracing();
  let (store, _) =
    seeded_store(&[("Wool Scarf", 2900, 3), ("Linen Shirt", 4500, 5), ("Silk Tie", 3900, 7)])
      .await;

  let names: Vec<String> = store
    .list_products()
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.name)
    .collect();
  assert_eq!(names, vec!["Linen Shirt", "Silk Tie", "Wool Scarf"]);
}

#[tokio::test]
async fn test_order_listing_is_newest_first() {
  setup_tracing();
  let (store, products) = seeded_store(&[("Linen Shirt", 4500, 9)]).await;
  let engine = engine(&store);

  for _ in 0..3 {
    engine
      .place_order(proposal_for(&products[0], 1))
      .await
      .unwrap();
  }

  let orders = store.list_orders().await.unwrap();
  assert_eq!(orders.len(), 3);
  for pair in orders.windows(2) {
    assert!(pair[0].created_at >= pair[1].created_at);
  }
}
