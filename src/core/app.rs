use axum::Router;
use std::sync::Arc;

use crate::core::middleware;
use crate::features::auth::{routes as auth_routes, JwtValidator, TokenService};
use crate::features::users::{routes as users_routes, UserService};
use crate::features::videos::{routes as videos_routes, CommentService, VideoService};

/// Services the HTTP API is assembled from
#[derive(Clone)]
pub struct ApiServices {
    pub jwt_validator: Arc<JwtValidator>,
    pub token_service: Arc<TokenService>,
    pub user_service: Arc<UserService>,
    pub video_service: Arc<VideoService>,
    pub comment_service: Arc<CommentService>,
}

/// Versioned API routes: public routes plus the JWT-guarded ones.
///
/// Swagger, health and the tower layers are added by the caller.
pub fn api_routes(services: &ApiServices, max_upload_size: usize) -> Router {
    let protected_routes = Router::new()
        .merge(users_routes::protected_routes(Arc::clone(
            &services.user_service,
        )))
        .merge(videos_routes::video_routes(
            Arc::clone(&services.video_service),
            max_upload_size,
        ))
        .merge(videos_routes::comment_routes(Arc::clone(
            &services.comment_service,
        )))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&services.jwt_validator),
            middleware::auth_middleware,
        ));

    let public_routes = Router::new()
        .merge(users_routes::public_routes(Arc::clone(&services.user_service)))
        .merge(auth_routes::routes(Arc::clone(&services.token_service)));

    Router::new().merge(protected_routes).merge(public_routes)
}
