use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::videos::models::Comment;

/// Request DTO for adding a comment
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddCommentDto {
    #[validate(length(min = 1, max = 1000, message = "Comment must be 1-1000 characters"))]
    pub comment: String,
}

/// Request DTO for editing a comment
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditCommentDto {
    #[validate(length(min = 1, max = 1000, message = "Comment must be 1-1000 characters"))]
    pub new_comment: String,
}

/// Request DTO for deleting a comment
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentDto {
    /// Optional; when present it must match the comment's video
    pub video_id: Option<Uuid>,
}

/// Response DTO for comment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponseDto {
    pub id: Uuid,
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponseDto {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            video_id: c.video_id,
            user_id: c.user_id,
            comment: c.body,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
