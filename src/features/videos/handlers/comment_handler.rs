use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::videos::dtos::{
    AddCommentDto, CommentResponseDto, DeleteCommentDto, EditCommentDto,
};
use crate::features::videos::services::CommentService;
use crate::shared::types::ApiResponse;

/// Comment on a video
#[utoipa::path(
    post,
    path = "/api/v1/videoManagement/addComment/{id}",
    tag = "comments",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    request_body = AddCommentDto,
    responses(
        (status = 201, description = "Comment added successfully!", body = ApiResponse<CommentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Video not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_comment(
    user: AuthenticatedUser,
    State(service): State<Arc<CommentService>>,
    Path(video_id): Path<Uuid>,
    AppJson(dto): AppJson<AddCommentDto>,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let comment = service.add(&user, video_id, dto.comment).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(comment),
            Some("Comment added successfully!".to_string()),
            None,
        )),
    ))
}

/// Delete a comment (author or video owner)
#[utoipa::path(
    post,
    path = "/api/v1/videoManagement/deleteComment/{id}",
    tag = "comments",
    params(
        ("id" = Uuid, Path, description = "Comment ID")
    ),
    request_body = DeleteCommentDto,
    responses(
        (status = 200, description = "Comment deleted successfully!", body = ApiResponse<CommentResponseDto>),
        (status = 400, description = "Comment does not belong to the given video"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not the author or video owner"),
        (status = 404, description = "Comment not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_comment(
    user: AuthenticatedUser,
    State(service): State<Arc<CommentService>>,
    Path(comment_id): Path<Uuid>,
    AppJson(dto): AppJson<DeleteCommentDto>,
) -> Result<Json<ApiResponse<CommentResponseDto>>> {
    let comment = service.delete(&user, comment_id, dto.video_id).await?;

    Ok(Json(ApiResponse::success(
        Some(comment),
        Some("Comment deleted successfully!".to_string()),
        None,
    )))
}

/// Edit a comment (author only)
#[utoipa::path(
    patch,
    path = "/api/v1/videoManagement/editComment/{id}",
    tag = "comments",
    params(
        ("id" = Uuid, Path, description = "Comment ID")
    ),
    request_body = EditCommentDto,
    responses(
        (status = 200, description = "Comment updated successfully!", body = ApiResponse<CommentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Comment not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn edit_comment(
    user: AuthenticatedUser,
    State(service): State<Arc<CommentService>>,
    Path(comment_id): Path<Uuid>,
    AppJson(dto): AppJson<EditCommentDto>,
) -> Result<Json<ApiResponse<CommentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let comment = service.edit(&user, comment_id, &dto.new_comment).await?;

    Ok(Json(ApiResponse::success(
        Some(comment),
        Some("Comment updated successfully!".to_string()),
        None,
    )))
}
