// tests/store_tests.rs
//
// Exercises the memory store's transaction mechanics directly, below the
// engine: read-set validation, the read-after-write rule, and visibility.
mod common;

use common::*;
use stockroom::{
  MemoryStore, OrderDraft, OrderStatus, Store, StoreError, StoreTransaction,
};

fn draft() -> OrderDraft {
  OrderDraft {
    customer: demo_customer(),
    items: Vec::new(),
    total_cents: 0,
    status: OrderStatus::Processing,
  }
}

#[tokio::test]
async fn test_read_after_write_is_rejected() {
  setup_tracing();
  let (store, products) = seeded_store(&[("Linen Shirt", 4500, 5)]).await;

  let mut tx = store.transaction().await.unwrap();
  tx.read_product(products[0].id).await.unwrap();
  tx.stage_stock(products[0].id, 4);

  let err = tx.read_product(products[0].id).await.unwrap_err();
  assert!(matches!(err, StoreError::ReadAfterWrite), "got {err:?}");
}

#[tokio::test]
async fn test_conflicting_commit_is_rejected_and_loser_applies_nothing() {
  setup_tracing();
  let (store, products) = seeded_store(&[("Linen Shirt", 4500, 5)]).await;
  let id = products[0].id;

  let mut tx_winner = store.transaction().await.unwrap();
  let mut tx_loser = store.transaction().await.unwrap();

  tx_winner.read_product(id).await.unwrap();
  tx_loser.read_product(id).await.unwrap();

  tx_winner.stage_stock(id, 4);
  tx_winner.commit().await.expect("first commit wins");

  tx_loser.stage_stock(id, 0);
  let err = tx_loser.commit().await.unwrap_err();
  assert!(matches!(err, StoreError::Conflict), "got {err:?}");

  // The winner's value stands.
  assert_eq!(stock_of(&store, &products[0]).await, 4);
}

#[tokio::test]
async fn test_vanished_document_invalidates_the_commit() {
  setup_tracing();
  let (store, products) = seeded_store(&[("Linen Shirt", 4500, 5)]).await;
  let id = products[0].id;

  let mut tx = store.transaction().await.unwrap();
  tx.read_product(id).await.unwrap();

  assert!(store.delete_product(id).await.unwrap());

  tx.stage_stock(id, 4);
  let err = tx.commit().await.unwrap_err();
  assert!(matches!(err, StoreError::Conflict), "got {err:?}");
}

#[tokio::test]
async fn test_document_appearing_after_a_missing_read_invalidates_the_commit() {
  setup_tracing();
  let store = MemoryStore::new();

  // Stage an order in one transaction to learn its key, read it as missing
  // in another, then let the first commit. The second transaction's read
  // set ("that key does not exist") is now stale.
  let mut tx_creator = store.transaction().await.unwrap();
  let order_id = tx_creator.stage_order(draft());

  let mut tx_reader = store.transaction().await.unwrap();
  assert!(tx_reader.read_order(order_id).await.unwrap().is_none());

  tx_creator.commit().await.expect("creator commits");

  tx_reader.stage_status(order_id, OrderStatus::Shipped);
  let err = tx_reader.commit().await.unwrap_err();
  assert!(matches!(err, StoreError::Conflict), "got {err:?}");
}

#[tokio::test]
async fn test_repeat_reads_return_the_same_snapshot() {
  setup_tracing();
  let (store, products) = seeded_store(&[("Linen Shirt", 4500, 5)]).await;
  let id = products[0].id;

  let mut tx_reader = store.transaction().await.unwrap();
  let first = tx_reader.read_product(id).await.unwrap().unwrap();
  assert_eq!(first.stock, 5);

  // A concurrent writer lands in between.
  let mut tx_writer = store.transaction().await.unwrap();
  tx_writer.read_product(id).await.unwrap();
  tx_writer.stage_stock(id, 3);
  tx_writer.commit().await.unwrap();

  // The reader still sees its own snapshot, and its commit reports the
  // staleness instead of silently proceeding.
  let second = tx_reader.read_product(id).await.unwrap().unwrap();
  assert_eq!(second.stock, 5);
  let err = tx_reader.commit().await.unwrap_err();
  assert!(matches!(err, StoreError::Conflict), "got {err:?}");
}

#[tokio::test]
async fn test_staged_writes_invisible_until_commit() {
  setup_tracing();
  let store = MemoryStore::new();

  let mut tx = store.transaction().await.unwrap();
  let order_id = tx.stage_order(draft());

  assert!(store.list_orders().await.unwrap().is_empty());
  assert!(store.fetch_order(order_id).await.unwrap().is_none());

  tx.commit().await.unwrap();

  assert_eq!(store.list_orders().await.unwrap().len(), 1);
  assert!(store.fetch_order(order_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_last_staged_stock_write_wins() {
  setup_tracing();
  let (store, products) = seeded_store(&[("Linen Shirt", 4500, 5)]).await;
  let id = products[0].id;

  let mut tx = store.transaction().await.unwrap();
  tx.read_product(id).await.unwrap();
  tx.stage_stock(id, 4);
  tx.stage_stock(id, 2);
  tx.commit().await.unwrap();

  assert_eq!(stock_of(&store, &products[0]).await, 2);
}

#[tokio::test]
async fn test_empty_transaction_commits_trivially() {
  setup_tracing();
  let store = MemoryStore::new();
  let tx = store.transaction().await.unwrap();
  tx.commit().await.expect("nothing staged, nothing to conflict");
}

#[tokio::test]
async fn test_offline_store_refuses_service() {
  setup_tracing();
  let (store, products) = seeded_store(&[("Linen Shirt", 4500, 5)]).await;

  store.set_offline(true);
  assert!(matches!(
    store.transaction().await.unwrap_err(),
    StoreError::Unavailable { .. }
  ));
  assert!(matches!(
    store.list_products().await.unwrap_err(),
    StoreError::Unavailable { .. }
  ));

  store.set_offline(false);
  assert_eq!(stock_of(&store, &products[0]).await, 5);
}

#[tokio::test]
async fn test_commit_fails_while_offline() {
  setup_tracing();
  let (store, products) = seeded_store(&[("Linen Shirt", 4500, 5)]).await;

  let mut tx = store.transaction().await.unwrap();
  tx.read_product(products[0].id).await.unwrap();
  tx.stage_stock(products[0].id, 4);

  store.set_offline(true);
  let err = tx.commit().await.unwrap_err();
  assert!(matches!(err, StoreError::Unavailable { .. }), "got {err:?}");

  // Nothing landed.
  store.set_offline(false);
  assert_eq!(stock_of(&store, &products[0]).await, 5);
}
