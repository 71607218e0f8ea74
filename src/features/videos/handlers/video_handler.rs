use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::multipart::VideoForm;
use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::videos::dtos::{
    parse_tags, EditVideoFormDto, UploadVideoFormDto, VideoChangesDto, VideoDetailsDto,
    VideoResponseDto, VideoSearchDto, VideosByCategoryDto,
};
use crate::features::videos::services::VideoService;
use crate::shared::types::{ApiResponse, Meta};

/// Upload a video
///
/// Accepts multipart/form-data with:
/// - `video`: the video file (required)
/// - `thumbnail`: thumbnail image (optional)
/// - `title`, `category`, `description` (required)
/// - `tags`: JSON array or comma separated list (optional)
#[utoipa::path(
    post,
    path = "/api/v1/videoManagement/postVideo",
    tag = "videos",
    request_body(
        content = UploadVideoFormDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "Video uploaded successfully!", body = ApiResponse<VideoResponseDto>),
        (status = 400, description = "Missing file or invalid video details"),
        (status = 401, description = "Authentication required"),
        (status = 409, description = "An object with this file name already exists"),
        (status = 413, description = "Upload too large"),
        (status = 500, description = "Storage failure")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn post_video(
    user: AuthenticatedUser,
    State(service): State<Arc<VideoService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<VideoResponseDto>>)> {
    let mut form = VideoForm::read(multipart, &["video", "thumbnail"]).await?;

    let video = form
        .take_file("video")
        .ok_or_else(|| AppError::BadRequest("Need valid video!".to_string()))?;
    let thumbnail = form.take_file("thumbnail");

    let missing = || AppError::BadRequest("Need valid video details".to_string());
    let details = VideoDetailsDto {
        title: form.take_text("title").ok_or_else(missing)?,
        category: form.take_text("category").ok_or_else(missing)?,
        description: form.take_text("description").ok_or_else(missing)?,
        tags: match form.take_text("tags") {
            Some(raw) => parse_tags(&raw).map_err(AppError::BadRequest)?,
            None => Vec::new(),
        },
    };

    let response = service.upload(&user, details, video, thumbnail).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(response),
            Some("Video uploaded successfully!".to_string()),
            None,
        )),
    ))
}

/// Get a video by ID (counts a view)
#[utoipa::path(
    get,
    path = "/api/v1/videoManagement/video/{id}",
    tag = "videos",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video retrieved successfully", body = ApiResponse<VideoResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Video not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_video(
    _user: AuthenticatedUser,
    State(service): State<Arc<VideoService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VideoResponseDto>>> {
    let video = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(video), None, None)))
}

/// List videos in a category, newest first
#[utoipa::path(
    post,
    path = "/api/v1/videoManagement/getVideoByCategory",
    tag = "videos",
    request_body = VideosByCategoryDto,
    responses(
        (status = 200, description = "Videos retrieved successfully", body = ApiResponse<Vec<VideoResponseDto>>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "No videos found!")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_videos_by_category(
    _user: AuthenticatedUser,
    State(service): State<Arc<VideoService>>,
    AppJson(dto): AppJson<VideosByCategoryDto>,
) -> Result<Json<ApiResponse<Vec<VideoResponseDto>>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let videos = service.list_by_category(&dto.category, dto.limit).await?;
    let total = videos.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(videos),
        None,
        Some(Meta { total }),
    )))
}

/// Search video titles (case-insensitive substring), optionally within a category
#[utoipa::path(
    post,
    path = "/api/v1/videoManagement/getVideoBySearchQuery",
    tag = "videos",
    request_body = VideoSearchDto,
    responses(
        (status = 200, description = "Videos retrieved successfully", body = ApiResponse<Vec<VideoResponseDto>>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "No videos found!")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn search_videos(
    _user: AuthenticatedUser,
    State(service): State<Arc<VideoService>>,
    AppJson(dto): AppJson<VideoSearchDto>,
) -> Result<Json<ApiResponse<Vec<VideoResponseDto>>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let videos = service
        .search(&dto.search_query, dto.category.as_deref(), dto.limit)
        .await?;
    let total = videos.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(videos),
        None,
        Some(Meta { total }),
    )))
}

/// Edit a video (uploader only)
///
/// Multipart form; every field is optional. A new `category` moves the video
/// object to that category's folder.
#[utoipa::path(
    patch,
    path = "/api/v1/videoManagement/editPost/{id}",
    tag = "videos",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    request_body(
        content = EditVideoFormDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 200, description = "Video updated successfully!", body = ApiResponse<VideoResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not the uploader"),
        (status = 404, description = "Video not found"),
        (status = 409, description = "Target file name already taken"),
        (status = 413, description = "Upload too large")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn edit_video(
    user: AuthenticatedUser,
    State(service): State<Arc<VideoService>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<VideoResponseDto>>> {
    let mut form = VideoForm::read(multipart, &["thumbnail"]).await?;

    let thumbnail = form.take_file("thumbnail");
    let changes = VideoChangesDto {
        title: form.take_text("title"),
        category: form.take_text("category"),
        description: form.take_text("description"),
        tags: form
            .take_text("tags")
            .map(|raw| parse_tags(&raw))
            .transpose()
            .map_err(AppError::BadRequest)?,
    };

    let video = service.edit(&user, id, changes, thumbnail).await?;

    Ok(Json(ApiResponse::success(
        Some(video),
        Some("Video updated successfully!".to_string()),
        None,
    )))
}

/// Like a video as the caller
#[utoipa::path(
    patch,
    path = "/api/v1/videoManagement/likePost/{id}",
    tag = "videos",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video liked successfully!", body = ApiResponse<VideoResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Video not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn like_video(
    user: AuthenticatedUser,
    State(service): State<Arc<VideoService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VideoResponseDto>>> {
    let video = service.like(&user, id).await?;
    Ok(Json(ApiResponse::success(
        Some(video),
        Some("Video liked successfully!".to_string()),
        None,
    )))
}

/// Remove the caller's like
#[utoipa::path(
    patch,
    path = "/api/v1/videoManagement/unLikePost/{id}",
    tag = "videos",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video unLiked successfully!", body = ApiResponse<VideoResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Video not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn unlike_video(
    user: AuthenticatedUser,
    State(service): State<Arc<VideoService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VideoResponseDto>>> {
    let video = service.unlike(&user, id).await?;
    Ok(Json(ApiResponse::success(
        Some(video),
        Some("Video unLiked successfully!".to_string()),
        None,
    )))
}
