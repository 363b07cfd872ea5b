// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::model::{OrderId, OrderStatus, ProductId};

/// Failures raised by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
  /// The optimistic commit collided with a concurrent writer. Transient:
  /// callers re-run the whole read-validate-stage cycle from a fresh read.
  #[error("transaction conflicted with a concurrent writer")]
  Conflict,

  /// The store could not be reached, or refused service. Not retried by the
  /// engine; the caller may retry the whole operation.
  #[error("store unavailable: {reason}")]
  Unavailable { reason: String },

  /// A read was issued after a write had been staged in the same
  /// transaction. The protocol is read-everything, then write-everything;
  /// hitting this is a bug in the calling code, not a runtime condition.
  #[error("read issued after a write was staged in the same transaction")]
  ReadAfterWrite,

  /// An implementation-specific failure wrapped at the store boundary.
  /// Hosted-store implementations put driver and protocol errors here.
  #[error("store backend error: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },
}

/// Failures surfaced by [`crate::checkout::CheckoutEngine::place_order`].
///
/// Every variant means the same thing for the store: nothing changed. There
/// is no partial success anywhere in this API.
#[derive(Debug, Error)]
pub enum CheckoutError {
  /// Rejected before any store access: empty cart, zero quantity, missing
  /// required customer fields.
  #[error("invalid order: {reason}")]
  Validation { reason: String },

  /// A line item's product key did not resolve in the catalog.
  #[error("product {product_id} not found")]
  ProductNotFound { product_id: ProductId },

  /// A line item asked for more units than the catalog holds. Identifies
  /// the offending product and what was actually available, so the caller
  /// can tell the customer precisely.
  #[error(
    "insufficient stock for product {product_id}: requested {requested}, available {available}"
  )]
  InsufficientStock {
    product_id: ProductId,
    requested: u32,
    available: u32,
  },

  /// Commit conflicts exhausted the retry budget. Safe for the caller to
  /// retry the whole order.
  #[error("checkout gave up after {attempts} conflicting attempts")]
  Contention { attempts: u32 },

  #[error("store error: {0}")]
  Store(#[from] StoreError),
}

/// Failures surfaced by the back-office operations in [`crate::admin`].
#[derive(Debug, Error)]
pub enum AdminError {
  #[error("product {product_id} not found")]
  ProductNotFound { product_id: ProductId },

  #[error("order {order_id} not found")]
  OrderNotFound { order_id: OrderId },

  /// The adjustment would take the committed stock count out of range.
  #[error("stock for product {product_id} cannot move by {delta} from {current}")]
  StockUnderflow {
    product_id: ProductId,
    current: u32,
    delta: i64,
  },

  /// The requested move is not an edge of the order state machine.
  #[error("order status cannot change from {from:?} to {to:?}")]
  InvalidTransition { from: OrderStatus, to: OrderStatus },

  /// Commit conflicts exhausted the retry budget; safe to retry.
  #[error("operation gave up after {attempts} conflicting attempts")]
  Contention { attempts: u32 },

  #[error("store error: {0}")]
  Store(#[from] StoreError),
}
