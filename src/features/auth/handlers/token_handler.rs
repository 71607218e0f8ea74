use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{AccessTokenResponseDto, RefreshTokenRequestDto};
use crate::features::auth::services::TokenService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/v1/tokenManagement/updateAccessToken",
    request_body = RefreshTokenRequestDto,
    responses(
        (status = 200, description = "Access token renewed", body = ApiResponse<AccessTokenResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Refresh token unknown, revoked or expired"),
        (status = 403, description = "Refresh token signature invalid")
    ),
    tag = "tokens"
)]
pub async fn update_access_token(
    State(service): State<Arc<TokenService>>,
    AppJson(dto): AppJson<RefreshTokenRequestDto>,
) -> Result<Json<ApiResponse<AccessTokenResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let access_token = service.renew_access_token(&dto.token).await?;
    let response = AccessTokenResponseDto {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: service.access_expires_in(),
    };

    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Revoke a refresh token (logout)
#[utoipa::path(
    post,
    path = "/api/v1/tokenManagement/revokeToken",
    request_body = RefreshTokenRequestDto,
    responses(
        (status = 200, description = "Refresh token revoked"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "No active refresh token matched")
    ),
    tag = "tokens"
)]
pub async fn revoke_token(
    State(service): State<Arc<TokenService>>,
    AppJson(dto): AppJson<RefreshTokenRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.revoke(&dto.token).await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("Token revoked".to_string()),
        None,
    )))
}
