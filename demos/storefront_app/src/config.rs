// demos/storefront_app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  /// Seed a handful of demo products into the catalog at startup.
  pub seed_catalog: bool,

  /// Commit attempts the checkout engine makes before reporting contention.
  pub checkout_max_attempts: u32,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = env::var("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let seed_catalog = env::var("SEED_CATALOG")
      .unwrap_or_else(|_| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_CATALOG value: {}", e)))?;

    let checkout_max_attempts = env::var("CHECKOUT_MAX_ATTEMPTS")
      .unwrap_or_else(|_| stockroom::DEFAULT_MAX_ATTEMPTS.to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid CHECKOUT_MAX_ATTEMPTS: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      seed_catalog,
      checkout_max_attempts,
    })
  }
}
