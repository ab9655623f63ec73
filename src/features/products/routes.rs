use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

use crate::core::middleware::auth_middleware;
use crate::features::auth::AuthService;
use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Product routes, mounted under `/api/v1/products`
///
/// Catalog reads are public. Writes require an admin session.
pub fn routes(service: Arc<ProductService>, auth: Arc<AuthService>) -> Router {
    let session = from_fn_with_state(auth, auth_middleware);

    Router::new()
        .route(
            "/create-product",
            post(handlers::create_product).route_layer(session.clone()),
        )
        .route("/get-product", get(handlers::get_products))
        .route("/get-product/{slug}", get(handlers::get_product))
        .route("/product-photo/{pid}", get(handlers::product_photo))
        .route("/product-list/{page}", get(handlers::product_list))
        .route("/product-count", get(handlers::product_count))
        .route("/product-filters", post(handlers::product_filters))
        .route("/search/{keyword}", get(handlers::search_products))
        .route("/product-category/{slug}", get(handlers::product_category))
        .route(
            "/{pid}",
            put(handlers::update_product)
                .delete(handlers::delete_product)
                .route_layer(session.clone()),
        )
        .route(
            "/update-product/{pid}",
            put(handlers::update_product).route_layer(session.clone()),
        )
        .route(
            "/product/{pid}",
            delete(handlers::delete_product).route_layer(session),
        )
        .with_state(service)
}
