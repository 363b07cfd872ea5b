// demos/storefront_app/src/main.rs

// Declare modules for the application
mod config;
mod errors;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use stockroom::{CheckoutEngine, MemoryStore};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting storefront application server...");

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      // For a demo service, panic is okay. In prod, exit gracefully.
      panic!("Configuration error: {}", e);
    }
  };

  // The document store and the transaction engine over it. The store handle
  // is explicit state threaded through AppState, never a process-wide
  // global.
  let store = Arc::new(MemoryStore::new());
  let checkout = Arc::new(
    CheckoutEngine::new(store.clone()).with_max_attempts(app_config.checkout_max_attempts),
  );

  // Seed demo products if configured
  if app_config.seed_catalog {
    match services::seed::seed_catalog(&store).await {
      Ok(count) => tracing::info!(count, "Demo catalog seeded."),
      Err(e) => tracing::error!(error = %e, "Failed to seed demo catalog."),
    }
  }

  // Create AppState
  let app_state = AppState {
    store,
    checkout,
    config: app_config.clone(),
  };

  // Configure and start the Actix Web server
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::routes::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
