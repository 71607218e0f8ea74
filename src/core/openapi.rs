use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers, model as auth_model};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::features::videos::{dtos as videos_dtos, handlers as videos_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Users
        users_handlers::register,
        users_handlers::login,
        users_handlers::get_user,
        users_handlers::follow_user,
        users_handlers::unfollow_user,
        // Tokens
        auth_handlers::update_access_token,
        auth_handlers::revoke_token,
        // Videos
        videos_handlers::post_video,
        videos_handlers::get_video,
        videos_handlers::get_videos_by_category,
        videos_handlers::search_videos,
        videos_handlers::edit_video,
        videos_handlers::like_video,
        videos_handlers::unlike_video,
        // Comments
        videos_handlers::add_comment,
        videos_handlers::delete_comment,
        videos_handlers::edit_comment,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Tokens
            auth_model::AuthenticatedUser,
            auth_dtos::RefreshTokenRequestDto,
            auth_dtos::AccessTokenResponseDto,
            ApiResponse<auth_dtos::AccessTokenResponseDto>,
            // Users
            users_dtos::RegisterRequestDto,
            users_dtos::LoginRequestDto,
            users_dtos::FollowRequestDto,
            users_dtos::UserResponseDto,
            users_dtos::LoginResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<users_dtos::LoginResponseDto>,
            // Videos
            videos_dtos::UploadVideoFormDto,
            videos_dtos::EditVideoFormDto,
            videos_dtos::VideosByCategoryDto,
            videos_dtos::VideoSearchDto,
            videos_dtos::VideoResponseDto,
            ApiResponse<videos_dtos::VideoResponseDto>,
            ApiResponse<Vec<videos_dtos::VideoResponseDto>>,
            // Comments
            videos_dtos::AddCommentDto,
            videos_dtos::EditCommentDto,
            videos_dtos::DeleteCommentDto,
            videos_dtos::CommentResponseDto,
            ApiResponse<videos_dtos::CommentResponseDto>,
        )
    ),
    tags(
        (name = "users", description = "Registration, login, profiles and follows"),
        (name = "tokens", description = "Access token renewal and refresh token revocation"),
        (name = "videos", description = "Video upload, browsing, editing and likes"),
        (name = "comments", description = "Comments on videos"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Clipstream API",
        version = "0.1.0",
        description = "API documentation for Clipstream",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
