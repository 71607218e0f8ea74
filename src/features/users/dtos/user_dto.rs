use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::User;

/// Request DTO for user registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestDto {
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub user_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(url(message = "Profile picture must be a valid URL"))]
    pub profile_pic_url: Option<String>,

    #[validate(length(max = 250, message = "Bio must be at most 250 characters"))]
    pub bio: Option<String>,
}

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request DTO for follow / unfollow; the caller comes from the access token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequestDto {
    /// User to follow or unfollow
    pub user_id: Uuid,
}

/// Public user profile (never includes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub profile_pic_url: Option<String>,
    pub bio: Option<String>,
    pub followers: Vec<Uuid>,
    pub following: Vec<Uuid>,
    pub followers_count: usize,
    pub following_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            user_name: u.user_name,
            email: u.email,
            profile_pic_url: u.profile_pic_url,
            bio: u.bio,
            followers_count: u.followers.len(),
            following_count: u.following.len(),
            followers: u.followers,
            following: u.following,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Response DTO for login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDto {
    pub user: UserResponseDto,
    /// Short-lived bearer token for protected routes
    pub access_token: String,
    /// Long-lived token for `/tokenManagement/updateAccessToken`
    pub refresh_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Access token expiry time in seconds
    pub expires_in: i64,
}
