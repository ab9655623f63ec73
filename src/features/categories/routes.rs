use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::core::middleware::auth_middleware;
use crate::features::auth::AuthService;
use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Category routes, mounted under `/api/v1/category`
///
/// Reads are public. Writes require an admin session.
pub fn routes(service: Arc<CategoryService>, auth: Arc<AuthService>) -> Router {
    let session = from_fn_with_state(auth, auth_middleware);

    Router::new()
        .route("/", get(handlers::list_categories))
        .route(
            "/create-category",
            post(handlers::create_category).route_layer(session.clone()),
        )
        .route(
            "/{key}",
            get(handlers::get_category).merge(
                put(handlers::update_category)
                    .delete(handlers::delete_category)
                    .route_layer(session),
            ),
        )
        .with_state(service)
}
