// core/src/store/mod.rs

//! The document-store abstraction the engine is written against.
//!
//! The engine never names a concrete database: it receives a store handle
//! and runs optimistic transactions through these traits. That keeps
//! checkout testable against [`memory::MemoryStore`] and leaves a seam for
//! a hosted document store behind the same contract.
//!
//! The transaction model is optimistic: reads record a read set, writes are
//! staged locally, and commit validates the read set against the current
//! committed documents before applying anything. Conflicting concurrent
//! transactions on the same document are serialized by that validation:
//! one commits, the other fails with [`StoreError::Conflict`] and re-runs.

pub mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{NewProduct, Order, OrderDraft, OrderId, OrderStatus, Product, ProductId};

/// A handle to the document store.
///
/// Handles are shared by cloning the `Arc` they usually live behind;
/// implementations carry their own interior synchronization.
#[async_trait]
pub trait Store: Send + Sync + 'static {
  type Tx: StoreTransaction;

  /// Begins an optimistic transaction.
  async fn transaction(&self) -> Result<Self::Tx, StoreError>;

  // Plain document operations. Creating or deleting whole documents does
  // not race the stock invariant; mutating `stock` or `status` on an
  // existing document must go through a transaction instead.

  /// All catalog entries, ordered by name.
  async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

  async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

  /// Inserts a catalog entry; the store assigns the key and `created_at`.
  async fn insert_product(&self, new: NewProduct) -> Result<Product, StoreError>;

  /// Removes a catalog entry. Returns `false` when the key did not resolve.
  async fn delete_product(&self, id: ProductId) -> Result<bool, StoreError>;

  /// All orders, newest first by the store-assigned creation timestamp.
  async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;

  async fn fetch_order(&self, id: OrderId) -> Result<Option<Order>, StoreError>;
}

/// One optimistic transaction against a [`Store`].
///
/// Reads return a stable snapshot within the transaction and record a
/// read-set entry. Commit re-validates every entry: a document that changed,
/// appeared, or disappeared since it was read fails the commit with
/// [`StoreError::Conflict`], and nothing is applied.
///
/// Reads are forbidden once any write has been staged (see
/// [`StoreError::ReadAfterWrite`]). Gather everything first, then stage
/// everything you intend to change.
#[async_trait]
pub trait StoreTransaction: Send {
  async fn read_product(&mut self, id: ProductId) -> Result<Option<Product>, StoreError>;

  async fn read_order(&mut self, id: OrderId) -> Result<Option<Order>, StoreError>;

  /// Stages a stock overwrite for a product. Staging the same product twice
  /// keeps the last value.
  fn stage_stock(&mut self, id: ProductId, new_stock: u32);

  /// Stages a status overwrite for an order.
  fn stage_status(&mut self, id: OrderId, status: OrderStatus);

  /// Stages creation of a new order document and returns its freshly
  /// generated key. The creation timestamp is assigned by the store at
  /// commit, never by the caller.
  fn stage_order(&mut self, draft: OrderDraft) -> OrderId;

  /// Validates the read set and applies every staged write atomically.
  /// A transaction that staged nothing commits trivially.
  async fn commit(self) -> Result<(), StoreError>;
}
