use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::features::videos::handlers;
use crate::features::videos::services::{CommentService, VideoService};

/// Multipart framing allowance on top of the configured file limit
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Video routes (all require JWT authentication)
pub fn video_routes(service: Arc<VideoService>, max_upload_size: usize) -> Router {
    let body_limit = max_upload_size + MULTIPART_OVERHEAD;

    Router::new()
        .route(
            "/api/v1/videoManagement/postVideo",
            post(handlers::post_video).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(
            "/api/v1/videoManagement/video/{id}",
            get(handlers::get_video),
        )
        .route(
            "/api/v1/videoManagement/getVideoByCategory",
            post(handlers::get_videos_by_category),
        )
        .route(
            "/api/v1/videoManagement/getVideoBySearchQuery",
            post(handlers::search_videos),
        )
        .route(
            "/api/v1/videoManagement/editPost/{id}",
            patch(handlers::edit_video).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(
            "/api/v1/videoManagement/likePost/{id}",
            patch(handlers::like_video),
        )
        .route(
            "/api/v1/videoManagement/unLikePost/{id}",
            patch(handlers::unlike_video),
        )
        .with_state(service)
}

/// Comment routes (all require JWT authentication)
pub fn comment_routes(service: Arc<CommentService>) -> Router {
    Router::new()
        .route(
            "/api/v1/videoManagement/addComment/{id}",
            post(handlers::add_comment),
        )
        .route(
            "/api/v1/videoManagement/deleteComment/{id}",
            post(handlers::delete_comment),
        )
        .route(
            "/api/v1/videoManagement/editComment/{id}",
            patch(handlers::edit_comment),
        )
        .with_state(service)
}
