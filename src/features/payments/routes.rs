use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::core::middleware::auth_middleware;
use crate::features::auth::AuthService;
use crate::features::payments::handlers;
use crate::features::payments::services::PaymentService;

/// Payment routes, merged into the `/api/v1/products` group
pub fn routes(service: Arc<PaymentService>, auth: Arc<AuthService>) -> Router {
    let session = from_fn_with_state(auth, auth_middleware);

    Router::new()
        .route("/braintree/token", get(handlers::client_token))
        .route(
            "/braintree/payment",
            post(handlers::checkout).route_layer(session),
        )
        .with_state(service)
}
