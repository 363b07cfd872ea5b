// core/src/model/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::product::ProductId;

/// Key of an order document. Generated when the order is staged, never
/// supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
  pub fn generate() -> Self {
    OrderId(Uuid::new_v4())
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl From<Uuid> for OrderId {
  fn from(id: Uuid) -> Self {
    OrderId(id)
  }
}

impl fmt::Display for OrderId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Delivery state of an order.
///
/// `Processing` is assigned exclusively by the checkout engine at creation.
/// The back office may move `Processing` to `Shipped` or `Cancelled`, and
/// `Shipped` to `Delivered`; `Delivered` and `Cancelled` are terminal. None
/// of these moves touch stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
  Processing,
  Shipped,
  Delivered,
  Cancelled,
}

impl OrderStatus {
  pub fn can_transition_to(self, next: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
      (self, next),
      (Processing, Shipped) | (Processing, Cancelled) | (Shipped, Delivered)
    )
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
  pub street: String,
  pub city: String,
  pub zip: String,
}

/// Contact block copied verbatim into the order record. Opaque to the
/// engine beyond the required `name` and `email` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
  pub name: String,
  pub email: String,
  pub mobile: Option<String>,
  pub address: Option<Address>,
}

/// One entry of an order.
///
/// `unit_price_cents` is the price captured when the order was placed; later
/// catalog price edits do not rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
  pub product_id: ProductId,
  pub name: String,
  pub unit_price_cents: i64,
  pub quantity: u32,
  pub size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
  pub id: OrderId,
  pub customer: Customer,
  pub items: Vec<LineItem>,
  pub total_cents: i64,
  pub status: OrderStatus,
  /// Assigned by the store at commit time, not by the caller.
  pub created_at: DateTime<Utc>,
}

/// A proposed order as received from the checkout caller.
///
/// `total_cents` and the per-item prices are copied into the order record
/// verbatim; the engine does not recompute them against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderProposal {
  pub customer: Customer,
  pub items: Vec<LineItem>,
  pub total_cents: i64,
}

/// What checkout stages for creation once every line item has passed
/// validation. The store assigns the key and the creation timestamp.
#[derive(Debug, Clone)]
pub struct OrderDraft {
  pub customer: Customer,
  pub items: Vec<LineItem>,
  pub total_cents: i64,
  pub status: OrderStatus,
}
