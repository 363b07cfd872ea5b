// demos/storefront_app/src/state.rs
use crate::config::AppConfig;
use std::sync::Arc;
use stockroom::{CheckoutEngine, MemoryStore};

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<MemoryStore>,
  pub checkout: Arc<CheckoutEngine<MemoryStore>>,
  pub config: Arc<AppConfig>, // Share loaded config
}
