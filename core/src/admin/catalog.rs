// core/src/admin/catalog.rs

use tracing::{debug, info, instrument, warn};

use crate::checkout::DEFAULT_MAX_ATTEMPTS;
use crate::error::{AdminError, StoreError};
use crate::model::{Product, ProductId};
use crate::store::{Store, StoreTransaction};

/// Applies a relative stock adjustment atomically and returns the updated
/// product.
///
/// Restocks pass a positive delta, corrections a negative one. An
/// adjustment that would push stock below zero is rejected with no effect.
/// Concurrent checkouts are serialized against this through the store's
/// conflict detection, exactly as two checkouts are serialized against each
/// other.
#[instrument(skip(store))]
pub async fn adjust_stock<S: Store>(
  store: &S,
  id: ProductId,
  delta: i64,
) -> Result<Product, AdminError> {
  let mut attempt = 0;
  loop {
    attempt += 1;
    match try_adjust(store, id, delta).await {
      Ok(product) => {
        info!(product_id = %id, delta, stock = product.stock, "stock adjusted");
        return Ok(product);
      }
      Err(AdminError::Store(StoreError::Conflict)) => {
        if attempt >= DEFAULT_MAX_ATTEMPTS {
          warn!(product_id = %id, attempt, "giving up after repeated commit conflicts");
          return Err(AdminError::Contention { attempts: attempt });
        }
        debug!(product_id = %id, attempt, "commit conflicted, retrying from a fresh read");
      }
      Err(other) => return Err(other),
    }
  }
}

async fn try_adjust<S: Store>(store: &S, id: ProductId, delta: i64) -> Result<Product, AdminError> {
  let mut tx = store.transaction().await?;
  let mut product = tx
    .read_product(id)
    .await?
    .ok_or(AdminError::ProductNotFound { product_id: id })?;

  // Overflowed additions fall out of u32 range and are rejected the same
  // way as a negative result.
  let adjusted = i64::from(product.stock).checked_add(delta).unwrap_or(-1);
  let new_stock = u32::try_from(adjusted).map_err(|_| AdminError::StockUnderflow {
    product_id: id,
    current: product.stock,
    delta,
  })?;

  tx.stage_stock(id, new_stock);
  tx.commit().await?;

  product.stock = new_stock;
  Ok(product)
}
