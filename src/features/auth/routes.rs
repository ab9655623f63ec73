use crate::core::middleware::auth_middleware;
use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// Auth routes, mounted under `/api/v1/auth`
pub fn routes(service: Arc<AuthService>) -> Router {
    let session = from_fn_with_state(Arc::clone(&service), auth_middleware);

    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/forgot-password", post(handlers::forgot_password))
        .route(
            "/profile",
            put(handlers::update_profile).route_layer(session.clone()),
        )
        .route("/me", get(handlers::get_me).route_layer(session.clone()))
        .route("/test", get(handlers::admin_probe).route_layer(session))
        .with_state(service)
}
