// core/src/model/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Key of a product document in the catalog collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
  pub fn generate() -> Self {
    ProductId(Uuid::new_v4())
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl From<Uuid> for ProductId {
  fn from(id: Uuid) -> Self {
    ProductId(id)
  }
}

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// A catalog entry.
///
/// `stock` is the only field the transaction engine ever writes; every other
/// field is read-only from its perspective. The unsigned type carries the
/// invariant that a committed stock count is never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  pub description: Option<String>,
  pub category: String,
  pub price_cents: i64,
  pub stock: u32,
  #[serde(default)]
  pub sizes: Vec<String>,
  pub image_url: Option<String>,
  /// Assigned by the store at insert time.
  pub created_at: DateTime<Utc>,
}

/// Insertable form of [`Product`]: the store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
  pub name: String,
  pub description: Option<String>,
  pub category: String,
  pub price_cents: i64,
  pub stock: u32,
  #[serde(default)]
  pub sizes: Vec<String>,
  pub image_url: Option<String>,
}
