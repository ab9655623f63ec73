use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, http::StatusCode, routing::get, Router};

use crate::features::auth::{routes as auth_routes, AuthService};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::payments::{routes as payments_routes, PaymentService};
use crate::features::products::{routes as products_routes, ProductService};

/// Services shared by every request
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<AuthService>,
    pub categories: Arc<CategoryService>,
    pub products: Arc<ProductService>,
    pub payments: Arc<PaymentService>,
}

/// Simple health check endpoint (no auth required)
async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// The versioned API plus `/health`, without docs or transport layers
pub fn api_router(services: &Services, max_body_size: usize) -> Router {
    let products = products_routes::routes(
        Arc::clone(&services.products),
        Arc::clone(&services.auth),
    )
    .merge(payments_routes::routes(
        Arc::clone(&services.payments),
        Arc::clone(&services.auth),
    ));

    Router::new()
        .nest(
            "/api/v1/auth",
            auth_routes::routes(Arc::clone(&services.auth)),
        )
        .nest(
            "/api/v1/category",
            categories_routes::routes(
                Arc::clone(&services.categories),
                Arc::clone(&services.auth),
            ),
        )
        .nest("/api/v1/products", products)
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(max_body_size))
}
