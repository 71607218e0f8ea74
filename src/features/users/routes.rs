use crate::features::users::handlers;
use crate::features::users::services::UserService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public user routes (no authentication required)
pub fn public_routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/v1/userManagement/register", post(handlers::register))
        .route("/api/v1/userManagement/login", post(handlers::login))
        .with_state(service)
}

/// Protected user routes (require JWT authentication)
pub fn protected_routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route(
            "/api/v1/userManagement/user/{userId}",
            get(handlers::get_user),
        )
        .route(
            "/api/v1/userManagement/followUser",
            post(handlers::follow_user),
        )
        .route(
            "/api/v1/userManagement/unFollowUser",
            post(handlers::unfollow_user),
        )
        .with_state(service)
}
