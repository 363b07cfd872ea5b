// core/src/checkout/mod.rs

//! The order-placement transaction.
//!
//! [`CheckoutEngine::place_order`] is the only path from a proposed order to
//! a committed stock mutation plus an order record. It resolves every line
//! item against the catalog inside one optimistic transaction, stages the
//! order document and every stock decrement, and commits the lot atomically.
//! A commit conflict re-runs the whole read-validate-stage cycle from a
//! fresh read, a bounded number of times.
//!
//! The read phase finishes completely before the first write is staged. The
//! store forbids reads after staged writes, and interleaving would also
//! break the all-or-nothing contract, so this ordering is load-bearing, not
//! stylistic. A checkout future dropped mid-flight leaves no trace either:
//! writes only land at commit.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::error::{CheckoutError, StoreError};
use crate::model::{OrderDraft, OrderId, OrderProposal, OrderStatus, ProductId};
use crate::store::{Store, StoreTransaction};

/// Commit attempts before an operation reports contention to the caller.
/// Contention on a single product during checkout is expected to be rare
/// and short-lived; a small budget absorbs it without risking a retry storm.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 4;

/// The order transaction engine. One engine serves any number of concurrent
/// checkouts; all serialization is delegated to the store's conflict
/// detection.
pub struct CheckoutEngine<S: Store> {
  store: Arc<S>,
  max_attempts: u32,
}

impl<S: Store> CheckoutEngine<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      max_attempts: DEFAULT_MAX_ATTEMPTS,
    }
  }

  /// Overrides the conflict retry budget. Clamped to at least one attempt.
  pub fn with_max_attempts(mut self, attempts: u32) -> Self {
    self.max_attempts = attempts.max(1);
    self
  }

  /// Atomically decrements stock for every line item and creates the order
  /// record, or leaves the store untouched and reports why.
  ///
  /// Two checkouts racing for the last unit of a product cannot both
  /// succeed: whichever commits first wins, and the loser re-reads the
  /// decremented stock on retry and fails with
  /// [`CheckoutError::InsufficientStock`].
  #[instrument(
    skip(self, proposal),
    fields(items = proposal.items.len(), total_cents = proposal.total_cents)
  )]
  pub async fn place_order(&self, proposal: OrderProposal) -> Result<OrderId, CheckoutError> {
    validate_proposal(&proposal)?;

    let mut attempt = 0;
    loop {
      attempt += 1;
      match self.try_place(&proposal).await {
        Ok(order_id) => {
          info!(%order_id, attempt, "order committed");
          return Ok(order_id);
        }
        Err(CheckoutError::Store(StoreError::Conflict)) => {
          if attempt >= self.max_attempts {
            warn!(attempt, "giving up after repeated commit conflicts");
            return Err(CheckoutError::Contention { attempts: attempt });
          }
          debug!(attempt, "commit conflicted, retrying from a fresh read");
        }
        Err(other) => return Err(other),
      }
    }
  }

  /// One read-validate-stage-commit cycle.
  async fn try_place(&self, proposal: &OrderProposal) -> Result<OrderId, CheckoutError> {
    let mut tx = self.store.transaction().await?;

    // Read phase: resolve every product and compute its post-order stock.
    // Nothing is staged until every line item has passed. Duplicate product
    // keys in one cart draw down a single running figure.
    let mut decrements: HashMap<ProductId, u32> = HashMap::new();
    for item in &proposal.items {
      let remaining = match decrements.get(&item.product_id) {
        Some(rem) => *rem,
        None => {
          tx.read_product(item.product_id)
            .await?
            .ok_or(CheckoutError::ProductNotFound {
              product_id: item.product_id,
            })?
            .stock
        }
      };
      let new_stock =
        remaining
          .checked_sub(item.quantity)
          .ok_or(CheckoutError::InsufficientStock {
            product_id: item.product_id,
            requested: item.quantity,
            available: remaining,
          })?;
      decrements.insert(item.product_id, new_stock);
    }

    // Write phase: the order document, then every decrement.
    let order_id = tx.stage_order(OrderDraft {
      customer: proposal.customer.clone(),
      items: proposal.items.clone(),
      total_cents: proposal.total_cents,
      status: OrderStatus::Processing,
    });
    for (product_id, new_stock) in decrements {
      tx.stage_stock(product_id, new_stock);
    }

    tx.commit().await?;
    Ok(order_id)
  }
}

/// Rejections that need no store access happen here, before any transaction
/// is begun.
fn validate_proposal(proposal: &OrderProposal) -> Result<(), CheckoutError> {
  if proposal.items.is_empty() {
    return Err(CheckoutError::Validation {
      reason: "cart is empty".to_string(),
    });
  }
  if proposal.items.iter().any(|item| item.quantity == 0) {
    return Err(CheckoutError::Validation {
      reason: "line item quantity must be positive".to_string(),
    });
  }
  if proposal.customer.name.trim().is_empty() {
    return Err(CheckoutError::Validation {
      reason: "customer name is required".to_string(),
    });
  }
  if proposal.customer.email.trim().is_empty() {
    return Err(CheckoutError::Validation {
      reason: "customer email is required".to_string(),
    });
  }
  Ok(())
}
