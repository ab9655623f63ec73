use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::Result;
use crate::shared::constants::MAX_PRICE_CENTS;
use crate::shared::validation::{FieldError, Rules};

/// Client authorization for the payment drop-in
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientTokenDto {
    pub client_token: String,
}

/// Request DTO for checkout
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct PaymentRequestDto {
    /// Cart items; each needs a numeric `price`, other fields are kept as sent
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub cart: Vec<Value>,

    /// Payment-method nonce from the client drop-in
    pub nonce: Option<String>,
}

/// Validated checkout
#[derive(Debug, Clone)]
pub struct Checkout {
    pub cart: Vec<Value>,
    pub nonce: String,
    pub total: Decimal,
}

fn item_price(item: &Value) -> Option<Decimal> {
    match item.get("price")? {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        _ => None,
    }
}

impl PaymentRequestDto {
    pub fn validated(self) -> Result<Checkout> {
        if self.cart.is_empty() {
            return Err(FieldError::invalid("cart", "Cart is empty").into());
        }
        Rules::new()
            .required("nonce", "Payment nonce", self.nonce.as_deref())
            .check()?;

        let max_price = Decimal::new(MAX_PRICE_CENTS, 2);
        let mut total = Decimal::ZERO;
        for item in &self.cart {
            let price = item_price(item)
                .filter(|p| !p.is_sign_negative())
                .ok_or_else(|| {
                    FieldError::invalid("cart", "Each cart item needs a non-negative price")
                })?;
            if price > max_price {
                return Err(FieldError::invalid("cart", "Cart item price is too large").into());
            }
            total = total
                .checked_add(price)
                .ok_or_else(|| FieldError::invalid("cart", "Order total is too large"))?;
        }

        // Sub-cent totals round to a zero sale
        let total = total.round_dp(2);
        if total <= Decimal::ZERO {
            return Err(
                FieldError::invalid("cart", "Order total must be greater than zero").into(),
            );
        }

        Ok(Checkout {
            cart: self.cart,
            nonce: self.nonce.unwrap_or_default().trim().to_string(),
            total,
        })
    }
}

/// Response DTO for a successful payment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResultDto {
    pub ok: bool,
    pub order_id: Uuid,
    pub transaction_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(cart: Value, nonce: Option<&str>) -> PaymentRequestDto {
        PaymentRequestDto {
            cart: serde_json::from_value(cart).unwrap(),
            nonce: nonce.map(str::to_string),
        }
    }

    #[test]
    fn test_total_sums_item_prices_exactly() {
        let checkout = request(
            json!([{ "name": "Lamp", "price": 19.99 }, { "price": 10.01 }]),
            Some("fake-valid-nonce"),
        )
        .validated()
        .unwrap();

        assert_eq!(checkout.total, Decimal::new(3000, 2));
        assert_eq!(checkout.cart[0]["name"], "Lamp");
    }

    #[test]
    fn test_rejections() {
        let cases = [
            (json!([]), Some("n"), "Cart is empty"),
            (json!([{ "price": 5 }]), None, "Payment nonce is required"),
            (json!([{ "price": "5" }]), Some("n"), "Each cart item needs a non-negative price"),
            (json!([{ "price": 0 }]), Some("n"), "Order total must be greater than zero"),
            (json!([{ "price": 0.004 }]), Some("n"), "Order total must be greater than zero"),
            (
                json!([{ "price": 5e28 }, { "price": 5e28 }]),
                Some("n"),
                "Cart item price is too large",
            ),
        ];

        for (cart, nonce, message) in cases {
            let err = request(cart, nonce).validated().unwrap_err();
            assert_eq!(err.to_string(), format!("Validation error: {message}"));
        }
    }

    #[test]
    fn test_total_stays_within_price_ceiling() {
        let ceiling = Decimal::new(MAX_PRICE_CENTS, 2);
        let checkout = request(
            json!([{ "price": 9999999999.99 }, { "price": 9999999999.99 }]),
            Some("n"),
        )
        .validated()
        .unwrap();
        assert_eq!(checkout.total, ceiling * Decimal::TWO);

        let err = request(json!([{ "price": 10000000000.0 }]), Some("n"))
            .validated()
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Cart item price is too large");
    }
}
