// demos/storefront_app/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use stockroom::{ProductId, Store};

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
  let products = app_state.store.list_products().await?;
  info!("Successfully fetched {} products.", products.len());

  Ok(HttpResponse::Ok().json(json!({
      "message": "Products fetched successfully.",
      "products": products
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let product_id = ProductId::from(path.into_inner());

  match app_state.store.fetch_product(product_id).await? {
    Some(product) => {
      info!("Product {} fetched successfully.", product_id);
      Ok(HttpResponse::Ok().json(json!({
          "message": "Product fetched successfully.",
          "product": product
      })))
    }
    None => {
      warn!("Product with ID {} not found.", product_id);
      Err(AppError::NotFound(format!(
        "Product with ID {} not found.",
        product_id
      )))
    }
  }
}
