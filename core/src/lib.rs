// src/lib.rs

//! Stockroom: a transactional order-placement engine for storefront backends.
//!
//! Stockroom guards the one invariant a shop cannot afford to lose: committed
//! stock never goes negative, no matter how many checkouts race. It provides:
//!  - A document-store abstraction with optimistic, read-validated
//!    transactions (and the read-before-write protocol they impose).
//!  - A two-phase checkout: validate every line item, then stage the order
//!    record and every stock decrement, then commit the lot atomically.
//!  - Bounded retry on commit conflicts, surfacing contention to the caller
//!    instead of spinning.
//!  - Back-office operations (stock adjustment, order status transitions)
//!    that go through the same transactional gate as checkout.
//!  - An in-memory store with fault-injection hooks for tests and demos.

pub mod admin;
pub mod checkout;
pub mod error;
pub mod model;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::checkout::{CheckoutEngine, DEFAULT_MAX_ATTEMPTS};
pub use crate::error::{AdminError, CheckoutError, StoreError};
pub use crate::model::{
  Address, Customer, LineItem, NewProduct, Order, OrderDraft, OrderId, OrderProposal, OrderStatus,
  Product, ProductId,
};
pub use crate::store::memory::MemoryStore;
pub use crate::store::{Store, StoreTransaction};

/*
    Core flow:
    1. Build (or connect) a store and wrap it in an Arc.
    2. Create a `CheckoutEngine` over that store handle.
    3. Hand the engine an `OrderProposal` (customer, line items, total).
    4. On success you get the new `OrderId`; on failure, a `CheckoutError`
       that names exactly why, and in every failure case the store is
       byte-for-byte untouched.
    5. Back-office mutations (restock, ship, cancel) go through
       `admin::adjust_stock` / `admin::update_status`, never through blind
       document overwrites.
*/
