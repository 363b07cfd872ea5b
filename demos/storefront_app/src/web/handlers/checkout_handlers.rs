// demos/storefront_app/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::payment_mock;
use crate::state::AppState;
use stockroom::OrderProposal;

/// Takes the proposed order straight from the request body, simulates the
/// payment authorization the original flow performs, then hands the
/// proposal to the transaction engine. Stock validation, the atomic
/// decrement, and the order record all happen inside `place_order`; this
/// handler only translates the outcome to HTTP.
#[instrument(
  name = "handler::checkout",
  skip(app_state, payload),
  fields(items = payload.items.len(), total_cents = payload.total_cents)
)]
pub async fn checkout_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<OrderProposal>,
) -> Result<HttpResponse, AppError> {
  let proposal = payload.into_inner();

  let receipt =
    payment_mock::authorize_payment(proposal.total_cents, &proposal.customer.email).await?;

  let order_id = app_state.checkout.place_order(proposal).await?;
  info!(%order_id, payment_ref = %receipt.id, "Checkout completed.");

  Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "order_id": order_id,
      "payment_ref": receipt.id,
  })))
}
