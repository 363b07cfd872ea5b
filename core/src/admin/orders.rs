// core/src/admin/orders.rs

use tracing::{debug, info, instrument, warn};

use crate::checkout::DEFAULT_MAX_ATTEMPTS;
use crate::error::{AdminError, StoreError};
use crate::model::{Order, OrderId, OrderStatus};
use crate::store::{Store, StoreTransaction};

/// Moves an order along the delivery state machine and returns the updated
/// record.
///
/// Legal moves are `Processing -> Shipped`, `Processing -> Cancelled` and
/// `Shipped -> Delivered`. Stock is untouched: cancelling an order does not
/// restock its items.
#[instrument(skip(store))]
pub async fn update_status<S: Store>(
  store: &S,
  id: OrderId,
  next: OrderStatus,
) -> Result<Order, AdminError> {
  let mut attempt = 0;
  loop {
    attempt += 1;
    match try_update(store, id, next).await {
      Ok(order) => {
        info!(order_id = %id, status = ?order.status, "order status updated");
        return Ok(order);
      }
      Err(AdminError::Store(StoreError::Conflict)) => {
        if attempt >= DEFAULT_MAX_ATTEMPTS {
          warn!(order_id = %id, attempt, "giving up after repeated commit conflicts");
          return Err(AdminError::Contention { attempts: attempt });
        }
        debug!(order_id = %id, attempt, "commit conflicted, retrying from a fresh read");
      }
      Err(other) => return Err(other),
    }
  }
}

async fn try_update<S: Store>(
  store: &S,
  id: OrderId,
  next: OrderStatus,
) -> Result<Order, AdminError> {
  let mut tx = store.transaction().await?;
  let mut order = tx
    .read_order(id)
    .await?
    .ok_or(AdminError::OrderNotFound { order_id: id })?;

  if !order.status.can_transition_to(next) {
    return Err(AdminError::InvalidTransition {
      from: order.status,
      to: next,
    });
  }

  tx.stage_status(id, next);
  tx.commit().await?;

  order.status = next;
  Ok(order)
}
