// demos/storefront_app/src/web/handlers/admin_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use stockroom::{admin, NewProduct, OrderId, OrderStatus, ProductId, Store};

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct StockAdjustRequest {
  /// Relative adjustment: positive restocks, negative corrects downward.
  pub delta: i64,
}

#[derive(Deserialize, Debug)]
pub struct StatusUpdateRequest {
  pub status: OrderStatus,
}

// --- Product administration ---

#[instrument(name = "handler::add_product", skip(app_state, payload))]
pub async fn add_product_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<NewProduct>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.store.insert_product(payload.into_inner()).await?;
  info!(product_id = %product.id, "Product added.");

  Ok(HttpResponse::Created().json(json!({
      "message": "Product added successfully.",
      "product": product
  })))
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let product_id = ProductId::from(path.into_inner());

  if app_state.store.delete_product(product_id).await? {
    info!("Product {} deleted.", product_id);
    Ok(HttpResponse::Ok().json(json!({ "message": "Product deleted successfully." })))
  } else {
    warn!("Product with ID {} not found.", product_id);
    Err(AppError::NotFound(format!(
      "Product with ID {} not found.",
      product_id
    )))
  }
}

/// Stock edits go through the engine's transactional adjustment, never a
/// document overwrite, so a restock racing a checkout cannot clobber the
/// decrement or push the count negative.
#[instrument(name = "handler::adjust_stock", skip(app_state, path, payload), fields(product_id = %path.as_ref()))]
pub async fn adjust_stock_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<StockAdjustRequest>,
) -> Result<HttpResponse, AppError> {
  let product_id = ProductId::from(path.into_inner());
  let delta = payload.delta;

  let product = admin::adjust_stock(app_state.store.as_ref(), product_id, delta).await?;
  info!(stock = product.stock, delta, "Stock adjusted.");

  Ok(HttpResponse::Ok().json(json!({
      "message": "Stock adjusted successfully.",
      "product": product
  })))
}

// --- Order administration ---

#[instrument(name = "handler::list_orders", skip(app_state))]
pub async fn list_orders_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let orders = app_state.store.list_orders().await?;
  info!("Successfully fetched {} orders.", orders.len());

  Ok(HttpResponse::Ok().json(json!({
      "message": "Orders fetched successfully.",
      "orders": orders
  })))
}

#[instrument(name = "handler::get_order", skip(app_state, path), fields(order_id = %path.as_ref()))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let order_id = OrderId::from(path.into_inner());

  match app_state.store.fetch_order(order_id).await? {
    Some(order) => Ok(HttpResponse::Ok().json(json!({
        "message": "Order fetched successfully.",
        "order": order
    }))),
    None => {
      warn!("Order with ID {} not found.", order_id);
      Err(AppError::NotFound(format!(
        "Order with ID {} not found.",
        order_id
      )))
    }
  }
}

#[instrument(name = "handler::update_order_status", skip(app_state, path, payload), fields(order_id = %path.as_ref()))]
pub async fn update_order_status_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<StatusUpdateRequest>,
) -> Result<HttpResponse, AppError> {
  let order_id = OrderId::from(path.into_inner());
  let next = payload.status;

  let order = admin::update_status(app_state.store.as_ref(), order_id, next).await?;
  info!(status = ?order.status, "Order status updated.");

  Ok(HttpResponse::Ok().json(json!({
      "message": "Order status updated successfully.",
      "order": order
  })))
}
