use crate::features::auth::handlers;
use crate::features::auth::services::TokenService;
use axum::{routing::post, Router};
use std::sync::Arc;

/// Token management routes (public; the refresh token is the credential)
pub fn routes(service: Arc<TokenService>) -> Router {
    Router::new()
        .route(
            "/api/v1/tokenManagement/updateAccessToken",
            post(handlers::update_access_token),
        )
        .route(
            "/api/v1/tokenManagement/revokeToken",
            post(handlers::revoke_token),
        )
        .with_state(service)
}
