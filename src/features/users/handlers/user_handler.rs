use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{
    FollowRequestDto, LoginRequestDto, LoginResponseDto, RegisterRequestDto, UserResponseDto,
};
use crate::features::users::services::UserService;
use crate::shared::types::ApiResponse;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/userManagement/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already exists")
    ),
    tag = "users"
)]
pub async fn register(
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.register(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(user),
            Some("User created successfully".to_string()),
            None,
        )),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/v1/userManagement/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Invalid email or password")
    ),
    tag = "users"
)]
pub async fn login(
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Get a user's public profile
#[utoipa::path(
    get,
    path = "/api/v1/userManagement/user/{userId}",
    params(
        ("userId" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_user(
    _user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let profile = service.get_profile(user_id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Follow another user
#[utoipa::path(
    post,
    path = "/api/v1/userManagement/followUser",
    request_body = FollowRequestDto,
    responses(
        (status = 200, description = "User followed successfully"),
        (status = 400, description = "Cannot follow yourself"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn follow_user(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<FollowRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    service.follow(&user, dto.user_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("User followed successfully!".to_string()),
        None,
    )))
}

/// Unfollow a user
#[utoipa::path(
    post,
    path = "/api/v1/userManagement/unFollowUser",
    request_body = FollowRequestDto,
    responses(
        (status = 200, description = "User unfollowed successfully"),
        (status = 400, description = "Cannot unfollow yourself"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn unfollow_user(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<FollowRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    service.unfollow(&user, dto.user_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("User unFollowed successfully!".to_string()),
        None,
    )))
}
