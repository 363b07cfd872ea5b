// demos/storefront_app/src/services/payment_mock.rs
use crate::errors::{AppError, Result as AppResult};
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct MockPaymentReceipt {
  pub id: String,
  pub amount_cents: i64,
  pub status: String, // "authorized" | "declined"
}

/// Simulates authorizing a card payment before the order is placed. A real
/// integration would sit behind the same call site.
#[instrument(skip(customer_email))]
pub async fn authorize_payment(
  amount_cents: i64,
  customer_email: &str,
) -> AppResult<MockPaymentReceipt> {
  info!(customer_email, "Simulating payment authorization");
  if amount_cents <= 0 {
    return Err(AppError::Payment(
      "Amount must be greater than zero".to_string(),
    ));
  }
  tokio::time::sleep(std::time::Duration::from_millis(30)).await; // Simulate network latency

  // Arbitrary decline condition so the failure path is reachable in demos.
  if amount_cents % 10_000 == 666 {
    info!("Mock payment DECLINED");
    return Err(AppError::Payment(
      "Mock payment declined due to test condition".to_string(),
    ));
  }

  let receipt = MockPaymentReceipt {
    id: format!("mock_pay_{}", Uuid::new_v4()),
    amount_cents,
    status: "authorized".to_string(),
  };
  info!("Mock payment AUTHORIZED with receipt ID: {}", receipt.id);
  Ok(receipt)
}
