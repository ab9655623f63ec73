use std::sync::Arc;

use serde_json::Value;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::payments::dtos::{Checkout, PaymentResultDto};
use crate::features::payments::gateway::PaymentGateway;
use crate::features::payments::models::NewOrder;
use crate::features::payments::repositories::OrderRepository;

/// Checkout against the payment gateway and order recording
pub struct PaymentService {
    gateway: Arc<dyn PaymentGateway>,
    orders: Arc<dyn OrderRepository>,
}

impl PaymentService {
    pub fn new(gateway: Arc<dyn PaymentGateway>, orders: Arc<dyn OrderRepository>) -> Self {
        Self { gateway, orders }
    }

    pub async fn client_token(&self) -> Result<String> {
        Ok(self.gateway.client_token().await?)
    }

    /// Charge the cart total, then record the order.
    ///
    /// There is no idempotency key: a retried request charges again.
    pub async fn checkout(
        &self,
        buyer: &AuthenticatedUser,
        checkout: Checkout,
    ) -> Result<PaymentResultDto> {
        let charge = match self.gateway.charge(&checkout.nonce, checkout.total).await {
            Ok(charge) => charge,
            Err(e) => {
                tracing::info!("Payment by {} not completed: {}", buyer.id, e);
                return Err(e.into());
            }
        };

        let order = NewOrder {
            products: Value::Array(checkout.cart),
            payment: charge.raw,
            buyer_id: buyer.id,
        };

        let order = self.orders.insert(order).await.inspect_err(|_| {
            tracing::error!(
                "Payment {} settled for buyer {} but the order was not recorded",
                charge.transaction_id,
                buyer.id
            );
        })?;

        tracing::info!(
            "Order {} recorded for transaction {} (total {})",
            order.id,
            charge.transaction_id,
            checkout.total
        );

        Ok(PaymentResultDto {
            ok: true,
            order_id: order.id,
            transaction_id: charge.transaction_id,
        })
    }
}
