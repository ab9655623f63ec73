//! Payment gateway port.
//!
//! Production uses [`BraintreeGateway`]; tests script outcomes with a fake.

mod braintree;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::core::error::AppError;

pub use braintree::BraintreeGateway;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway refused the sale; carries its message
    #[error("{0}")]
    Declined(String),

    #[error("Payment gateway unavailable: {0}")]
    Transport(String),

    #[error("Unexpected payment gateway response: {0}")]
    Protocol(String),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Declined(msg) => AppError::Payment(msg),
            other => AppError::ExternalServiceError(other.to_string()),
        }
    }
}

/// A settled sale
#[derive(Debug, Clone)]
pub struct Charge {
    pub transaction_id: String,
    pub status: String,
    /// Gateway result payload, stored with the order
    pub raw: serde_json::Value,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Authorization for the client-side drop-in
    async fn client_token(&self) -> Result<String, GatewayError>;

    /// Sale against a payment-method nonce, submitted for settlement
    async fn charge(&self, nonce: &str, amount: Decimal) -> Result<Charge, GatewayError>;
}
