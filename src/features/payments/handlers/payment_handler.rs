use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::payments::dtos::{ClientTokenDto, PaymentRequestDto, PaymentResultDto};
use crate::features::payments::services::PaymentService;
use crate::shared::types::ApiResponse;

/// Client token for the payment drop-in
#[utoipa::path(
    get,
    path = "/api/v1/products/braintree/token",
    responses(
        (status = 200, description = "Client token issued", body = ApiResponse<ClientTokenDto>),
        (status = 502, description = "Payment gateway unavailable")
    ),
    tag = "payments"
)]
pub async fn client_token(
    State(service): State<Arc<PaymentService>>,
) -> Result<Json<ApiResponse<ClientTokenDto>>> {
    let client_token = service.client_token().await?;
    Ok(Json(ApiResponse::ok(
        ClientTokenDto { client_token },
        "Client token issued",
    )))
}

/// Pay for a cart and record the order
#[utoipa::path(
    post,
    path = "/api/v1/products/braintree/payment",
    request_body = PaymentRequestDto,
    responses(
        (status = 200, description = "Payment settled and order recorded", body = ApiResponse<PaymentResultDto>),
        (status = 400, description = "Empty cart, missing nonce or invalid total"),
        (status = 401, description = "Unauthorized"),
        (status = 402, description = "Payment declined"),
        (status = 502, description = "Payment gateway unavailable")
    ),
    tag = "payments",
    security(("bearer_auth" = []))
)]
pub async fn checkout(
    user: AuthenticatedUser,
    State(service): State<Arc<PaymentService>>,
    AppJson(dto): AppJson<PaymentRequestDto>,
) -> Result<Json<ApiResponse<PaymentResultDto>>> {
    let checkout = dto.validated()?;
    let result = service.checkout(&user, checkout).await?;
    Ok(Json(ApiResponse::ok(result, "Payment successful")))
}
