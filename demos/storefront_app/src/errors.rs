// demos/storefront_app/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use stockroom::{AdminError, CheckoutError, StoreError};

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Insufficient Stock: product {product_id} has {available} left, {requested} requested")]
  OutOfStock {
    product_id: String,
    requested: u32,
    available: u32,
  },

  #[error("Conflict: {0}")]
  Conflict(String), // Illegal order-status moves and the like

  #[error("Store Busy: {0}")]
  Busy(String), // Contention exhausted the retry budget; safe to retry

  #[error("Store Unavailable: {0}")]
  Unavailable(String),

  #[error("Payment Error: {0}")]
  Payment(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<StoreError> for AppError {
  fn from(err: StoreError) -> Self {
    match err {
      StoreError::Unavailable { reason } => AppError::Unavailable(reason),
      // A bare Conflict at this level means a caller skipped the retrying
      // engine paths; report it as busy-but-retryable all the same.
      StoreError::Conflict => AppError::Busy("please retry the request".to_string()),
      StoreError::ReadAfterWrite | StoreError::Backend { .. } => {
        AppError::Internal(err.to_string())
      }
    }
  }
}

impl From<CheckoutError> for AppError {
  fn from(err: CheckoutError) -> Self {
    match err {
      CheckoutError::Validation { reason } => AppError::Validation(reason),
      CheckoutError::ProductNotFound { product_id } => {
        AppError::NotFound(format!("product {}", product_id))
      }
      CheckoutError::InsufficientStock {
        product_id,
        requested,
        available,
      } => AppError::OutOfStock {
        product_id: product_id.to_string(),
        requested,
        available,
      },
      CheckoutError::Contention { .. } => {
        AppError::Busy("checkout hit heavy contention, please retry".to_string())
      }
      CheckoutError::Store(store_err) => store_err.into(),
    }
  }
}

impl From<AdminError> for AppError {
  fn from(err: AdminError) -> Self {
    match err {
      AdminError::ProductNotFound { product_id } => {
        AppError::NotFound(format!("product {}", product_id))
      }
      AdminError::OrderNotFound { order_id } => AppError::NotFound(format!("order {}", order_id)),
      AdminError::StockUnderflow { .. } => AppError::Validation(err.to_string()),
      AdminError::InvalidTransition { .. } => AppError::Conflict(err.to_string()),
      AdminError::Contention { .. } => {
        AppError::Busy("operation hit heavy contention, please retry".to_string())
      }
      AdminError::Store(store_err) => store_err.into(),
    }
  }
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience
// in handlers that use `?` on functions returning anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(err.to_string())
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => {
        HttpResponse::BadRequest().json(json!({"success": false, "error": m}))
      }
      AppError::NotFound(m) => {
        HttpResponse::NotFound().json(json!({"success": false, "error": m}))
      }
      AppError::OutOfStock {
        product_id,
        requested,
        available,
      } => HttpResponse::Conflict().json(json!({
        "success": false,
        "error": self.to_string(),
        "product_id": product_id,
        "requested": requested,
        "available": available,
      })),
      AppError::Conflict(m) => {
        HttpResponse::Conflict().json(json!({"success": false, "error": m}))
      }
      AppError::Busy(m) => HttpResponse::ServiceUnavailable()
        .json(json!({"success": false, "error": m, "retryable": true})),
      AppError::Unavailable(m) => HttpResponse::ServiceUnavailable()
        .json(json!({"success": false, "error": "Store unavailable", "detail": m})),
      AppError::Payment(m) => {
        HttpResponse::PaymentRequired().json(json!({"success": false, "error": m}))
      }
      AppError::Config(m) => HttpResponse::InternalServerError()
        .json(json!({"success": false, "error": "Configuration issue", "detail": m})),
      AppError::Internal(m) => HttpResponse::InternalServerError()
        .json(json!({"success": false, "error": "An internal error occurred", "detail": m})),
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
