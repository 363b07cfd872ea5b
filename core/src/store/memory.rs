// core/src/store/memory.rs

//! In-memory implementation of the store traits.
//!
//! Every committed document carries a version counter bumped on each write.
//! A transaction records the version it observed for every key it read, and
//! commit re-checks those versions under the store lock before applying the
//! staged writes. That serializes conflicting writers the same way a hosted
//! optimistic-transaction store would, just without the network.
//!
//! Fault-injection hooks ([`MemoryStore::inject_conflicts`] and
//! [`MemoryStore::set_offline`]) let tests drive the retry and
//! unavailability paths deterministically, without real contention.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::trace;

use crate::error::StoreError;
use crate::model::{NewProduct, Order, OrderDraft, OrderId, OrderStatus, Product, ProductId};
use crate::store::{Store, StoreTransaction};

#[derive(Debug, Clone)]
struct Versioned<T> {
  value: T,
  version: u64,
}

#[derive(Debug, Default)]
struct Collections {
  products: HashMap<ProductId, Versioned<Product>>,
  orders: HashMap<OrderId, Versioned<Order>>,
  /// Commits that must fail with `Conflict` before normal service resumes.
  forced_conflicts: u32,
  offline: bool,
}

impl Collections {
  fn check_online(&self) -> Result<(), StoreError> {
    if self.offline {
      return Err(StoreError::Unavailable {
        reason: "store is offline".to_string(),
      });
    }
    Ok(())
  }
}

/// An in-memory document store with optimistic transactions.
///
/// Cloning the handle is cheap and shares the underlying collections. The
/// internal lock is only ever held for short, non-awaiting sections.
#[derive(Clone, Default, Debug)]
pub struct MemoryStore {
  inner: Arc<Mutex<Collections>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Forces the next `n` commits to fail with [`StoreError::Conflict`],
  /// regardless of their read sets. Test and demo hook.
  pub fn inject_conflicts(&self, n: u32) {
    self.inner.lock().forced_conflicts = n;
  }

  /// While offline, beginning a transaction, committing one, and every
  /// plain document operation fail with [`StoreError::Unavailable`]. Test
  /// and demo hook.
  pub fn set_offline(&self, offline: bool) {
    self.inner.lock().offline = offline;
  }
}

#[async_trait]
impl Store for MemoryStore {
  type Tx = MemoryTransaction;

  async fn transaction(&self) -> Result<Self::Tx, StoreError> {
    self.inner.lock().check_online()?;
    Ok(MemoryTransaction {
      store: self.clone(),
      product_reads: HashMap::new(),
      order_reads: HashMap::new(),
      staged_stock: HashMap::new(),
      staged_status: HashMap::new(),
      staged_orders: Vec::new(),
      wrote: false,
    })
  }

  async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
    let inner = self.inner.lock();
    inner.check_online()?;
    let mut products: Vec<Product> = inner.products.values().map(|v| v.value.clone()).collect();
    products.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(products)
  }

  async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
    let inner = self.inner.lock();
    inner.check_online()?;
    Ok(inner.products.get(&id).map(|v| v.value.clone()))
  }

  async fn insert_product(&self, new: NewProduct) -> Result<Product, StoreError> {
    let mut inner = self.inner.lock();
    inner.check_online()?;
    let product = Product {
      id: ProductId::generate(),
      name: new.name,
      description: new.description,
      category: new.category,
      price_cents: new.price_cents,
      stock: new.stock,
      sizes: new.sizes,
      image_url: new.image_url,
      created_at: Utc::now(),
    };
    trace!(product_id = %product.id, stock = product.stock, "product inserted");
    inner.products.insert(
      product.id,
      Versioned {
        value: product.clone(),
        version: 0,
      },
    );
    Ok(product)
  }

  async fn delete_product(&self, id: ProductId) -> Result<bool, StoreError> {
    let mut inner = self.inner.lock();
    inner.check_online()?;
    Ok(inner.products.remove(&id).is_some())
  }

  async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
    let inner = self.inner.lock();
    inner.check_online()?;
    let mut orders: Vec<Order> = inner.orders.values().map(|v| v.value.clone()).collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(orders)
  }

  async fn fetch_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
    let inner = self.inner.lock();
    inner.check_online()?;
    Ok(inner.orders.get(&id).map(|v| v.value.clone()))
  }
}

/// A snapshot read: the version observed (None when the key was absent) and
/// the value handed back, cached so repeat reads stay stable within the
/// transaction.
#[derive(Debug)]
struct ReadEntry<T> {
  version: Option<u64>,
  value: Option<T>,
}

#[derive(Debug)]
pub struct MemoryTransaction {
  store: MemoryStore,
  product_reads: HashMap<ProductId, ReadEntry<Product>>,
  order_reads: HashMap<OrderId, ReadEntry<Order>>,
  staged_stock: HashMap<ProductId, u32>,
  staged_status: HashMap<OrderId, OrderStatus>,
  staged_orders: Vec<(OrderId, OrderDraft)>,
  wrote: bool,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
  async fn read_product(&mut self, id: ProductId) -> Result<Option<Product>, StoreError> {
    if self.wrote {
      return Err(StoreError::ReadAfterWrite);
    }
    if let Some(entry) = self.product_reads.get(&id) {
      return Ok(entry.value.clone());
    }
    let inner = self.store.inner.lock();
    inner.check_online()?;
    let doc = inner.products.get(&id);
    let entry = ReadEntry {
      version: doc.map(|v| v.version),
      value: doc.map(|v| v.value.clone()),
    };
    let value = entry.value.clone();
    drop(inner);
    self.product_reads.insert(id, entry);
    Ok(value)
  }

  async fn read_order(&mut self, id: OrderId) -> Result<Option<Order>, StoreError> {
    if self.wrote {
      return Err(StoreError::ReadAfterWrite);
    }
    if let Some(entry) = self.order_reads.get(&id) {
      return Ok(entry.value.clone());
    }
    let inner = self.store.inner.lock();
    inner.check_online()?;
    let doc = inner.orders.get(&id);
    let entry = ReadEntry {
      version: doc.map(|v| v.version),
      value: doc.map(|v| v.value.clone()),
    };
    let value = entry.value.clone();
    drop(inner);
    self.order_reads.insert(id, entry);
    Ok(value)
  }

  fn stage_stock(&mut self, id: ProductId, new_stock: u32) {
    self.wrote = true;
    self.staged_stock.insert(id, new_stock);
  }

  fn stage_status(&mut self, id: OrderId, status: OrderStatus) {
    self.wrote = true;
    self.staged_status.insert(id, status);
  }

  fn stage_order(&mut self, draft: OrderDraft) -> OrderId {
    self.wrote = true;
    let id = OrderId::generate();
    self.staged_orders.push((id, draft));
    id
  }

  async fn commit(self) -> Result<(), StoreError> {
    let mut inner = self.store.inner.lock();
    inner.check_online()?;

    if inner.forced_conflicts > 0 {
      inner.forced_conflicts -= 1;
      trace!("commit failed by injected conflict");
      return Err(StoreError::Conflict);
    }

    // Validate the read set both ways: a changed version, a document that
    // appeared, and a document that vanished all invalidate the commit.
    for (id, entry) in &self.product_reads {
      let current = inner.products.get(id).map(|v| v.version);
      if current != entry.version {
        trace!(product_id = %id, "commit conflict on product read set");
        return Err(StoreError::Conflict);
      }
    }
    for (id, entry) in &self.order_reads {
      let current = inner.orders.get(id).map(|v| v.version);
      if current != entry.version {
        trace!(order_id = %id, "commit conflict on order read set");
        return Err(StoreError::Conflict);
      }
    }

    // Staged overwrites against documents that no longer exist cannot be
    // applied atomically with the rest; treat them as conflicts too.
    for id in self.staged_stock.keys() {
      if !inner.products.contains_key(id) {
        return Err(StoreError::Conflict);
      }
    }
    for id in self.staged_status.keys() {
      if !inner.orders.contains_key(id) {
        return Err(StoreError::Conflict);
      }
    }

    // Point of no return: everything below succeeds as one unit.
    for (id, new_stock) in &self.staged_stock {
      if let Some(doc) = inner.products.get_mut(id) {
        doc.value.stock = *new_stock;
        doc.version += 1;
      }
    }
    for (id, status) in &self.staged_status {
      if let Some(doc) = inner.orders.get_mut(id) {
        doc.value.status = *status;
        doc.version += 1;
      }
    }

    let created_at = Utc::now();
    for (id, draft) in self.staged_orders {
      let order = Order {
        id,
        customer: draft.customer,
        items: draft.items,
        total_cents: draft.total_cents,
        status: draft.status,
        created_at,
      };
      trace!(order_id = %id, "order committed");
      inner.orders.insert(
        id,
        Versioned {
          value: order,
          version: 0,
        },
      );
    }

    Ok(())
  }
}
