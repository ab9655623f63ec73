use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};

use super::{Charge, GatewayError, PaymentGateway};
use crate::core::config::BraintreeConfig;

const BRAINTREE_VERSION: &str = "2019-01-01";

const CLIENT_TOKEN_MUTATION: &str = r#"
mutation ClientToken($input: CreateClientTokenInput) {
  createClientToken(input: $input) {
    clientToken
  }
}
"#;

const CHARGE_MUTATION: &str = r#"
mutation Charge($input: ChargePaymentMethodInput!) {
  chargePaymentMethod(input: $input) {
    transaction {
      id
      status
      amount { value currencyCode }
      createdAt
    }
  }
}
"#;

/// Transaction statuses that mean the sale did not go through
const FAILED_STATUSES: &[&str] = &[
    "FAILED",
    "GATEWAY_REJECTED",
    "PROCESSOR_DECLINED",
    "SETTLEMENT_DECLINED",
    "VOIDED",
];

/// GraphQL error classes caused by our credentials or the gateway itself
const SERVICE_ERROR_CLASSES: &[&str] = &[
    "AUTHENTICATION",
    "AUTHORIZATION",
    "INTERNAL",
    "NOT_IMPLEMENTED",
    "SERVICE_AVAILABILITY",
    "UNSUPPORTED_CLIENT",
];

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// Braintree GraphQL API client
pub struct BraintreeGateway {
    endpoint: &'static str,
    public_key: String,
    private_key: String,
    http_client: reqwest::Client,
}

impl BraintreeGateway {
    pub fn new(config: &BraintreeConfig) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        tracing::info!(
            "Braintree gateway configured: merchant={}, endpoint={}",
            config.merchant_id,
            config.environment.graphql_url()
        );

        Ok(Self {
            endpoint: config.environment.graphql_url(),
            public_key: config.public_key.clone(),
            private_key: config.private_key.clone(),
            http_client,
        })
    }

    async fn execute(&self, query: &str, variables: Value) -> Result<Value, GatewayError> {
        let response = self
            .http_client
            .post(self.endpoint)
            .basic_auth(&self.public_key, Some(&self.private_key))
            .header("Braintree-Version", BRAINTREE_VERSION)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Braintree request failed: {}", e);
                GatewayError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status.is_server_error() || status.as_u16() == 401 || status.as_u16() == 403 {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Braintree API error: HTTP {} - {}", status, body);
            return Err(GatewayError::Transport(format!("HTTP {}", status)));
        }

        response.json::<Value>().await.map_err(|e| {
            tracing::error!("Failed to parse Braintree response: {}", e);
            GatewayError::Protocol(e.to_string())
        })
    }
}

#[async_trait]
impl PaymentGateway for BraintreeGateway {
    async fn client_token(&self) -> Result<String, GatewayError> {
        let body = self
            .execute(CLIENT_TOKEN_MUTATION, json!({ "input": {} }))
            .await?;
        parse_client_token(&body)
    }

    async fn charge(&self, nonce: &str, amount: Decimal) -> Result<Charge, GatewayError> {
        let variables = json!({
            "input": {
                "paymentMethodId": nonce,
                "transaction": { "amount": format!("{:.2}", amount) }
            }
        });

        let body = self.execute(CHARGE_MUTATION, variables).await?;
        let charge = parse_charge(&body)?;
        tracing::info!(
            "Braintree sale {} settled with status {}",
            charge.transaction_id,
            charge.status
        );
        Ok(charge)
    }
}

/// First GraphQL error, classified as a decline or a service failure
fn graphql_error(body: &Value) -> Option<GatewayError> {
    let first = body.get("errors")?.as_array()?.first()?;
    let message = first
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Payment failed")
        .to_string();
    let class = first
        .pointer("/extensions/errorClass")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if SERVICE_ERROR_CLASSES.contains(&class) {
        tracing::error!("Braintree service error ({}): {}", class, message);
        Some(GatewayError::Transport(message))
    } else {
        Some(GatewayError::Declined(message))
    }
}

fn parse_client_token(body: &Value) -> Result<String, GatewayError> {
    if let Some(err) = graphql_error(body) {
        return Err(err);
    }

    body.pointer("/data/createClientToken/clientToken")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| GatewayError::Protocol("missing clientToken".to_string()))
}

fn parse_charge(body: &Value) -> Result<Charge, GatewayError> {
    if let Some(err) = graphql_error(body) {
        return Err(err);
    }

    let transaction = body
        .pointer("/data/chargePaymentMethod/transaction")
        .filter(|t| !t.is_null())
        .ok_or_else(|| GatewayError::Protocol("missing transaction".to_string()))?;

    let transaction_id = transaction
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::Protocol("missing transaction id".to_string()))?
        .to_string();
    let status = transaction
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("UNKNOWN")
        .to_string();

    if FAILED_STATUSES.contains(&status.as_str()) {
        return Err(GatewayError::Declined(format!(
            "Transaction {} was not accepted: {}",
            transaction_id, status
        )));
    }

    Ok(Charge {
        transaction_id,
        status,
        raw: transaction.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_client_token() {
        let body = json!({ "data": { "createClientToken": { "clientToken": "tok_123" } } });
        assert_eq!(parse_client_token(&body).unwrap(), "tok_123");

        let empty = json!({ "data": null });
        assert!(matches!(
            parse_client_token(&empty),
            Err(GatewayError::Protocol(_))
        ));
    }

    #[test]
    fn test_parse_settled_charge() {
        let body = json!({
            "data": { "chargePaymentMethod": { "transaction": {
                "id": "dHJhbnNhY3Rpb25fYWJj",
                "status": "SUBMITTED_FOR_SETTLEMENT",
                "amount": { "value": "30.00", "currencyCode": "USD" }
            } } }
        });

        let charge = parse_charge(&body).unwrap();
        assert_eq!(charge.transaction_id, "dHJhbnNhY3Rpb25fYWJj");
        assert_eq!(charge.status, "SUBMITTED_FOR_SETTLEMENT");
        assert_eq!(charge.raw["amount"]["value"], "30.00");
    }

    #[test]
    fn test_validation_error_is_a_decline() {
        let body = json!({
            "data": { "chargePaymentMethod": null },
            "errors": [{
                "message": "Unknown or expired payment method ID.",
                "extensions": { "errorClass": "VALIDATION" }
            }]
        });

        match parse_charge(&body) {
            Err(GatewayError::Declined(msg)) => {
                assert_eq!(msg, "Unknown or expired payment method ID.")
            }
            other => panic!("expected decline, got {other:?}"),
        }
    }

    #[test]
    fn test_authentication_error_is_a_service_failure() {
        let body = json!({
            "errors": [{
                "message": "Authentication failed",
                "extensions": { "errorClass": "AUTHENTICATION" }
            }]
        });
        assert!(matches!(
            parse_client_token(&body),
            Err(GatewayError::Transport(_))
        ));
    }

    #[test]
    fn test_processor_declined_status() {
        let body = json!({
            "data": { "chargePaymentMethod": { "transaction": {
                "id": "tx1",
                "status": "PROCESSOR_DECLINED"
            } } }
        });
        assert!(matches!(parse_charge(&body), Err(GatewayError::Declined(_))));
    }
}
