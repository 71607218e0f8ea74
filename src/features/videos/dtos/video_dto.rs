use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::videos::models::Video;
use crate::shared::validation::CATEGORY_REGEX;

/// Upload form for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadVideoFormDto {
    /// The video file
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub video: String,
    /// Optional thumbnail image
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub thumbnail: Option<String>,
    #[schema(example = "My first clip")]
    pub title: String,
    #[schema(example = "music")]
    pub category: String,
    pub description: String,
    /// JSON array (`["a","b"]`) or comma separated list
    #[schema(example = "[\"live\",\"guitar\"]")]
    pub tags: Option<String>,
}

/// Edit form for OpenAPI documentation; every field is optional
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct EditVideoFormDto {
    /// Replacement thumbnail image
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub thumbnail: Option<String>,
    pub title: Option<String>,
    /// Changing the category moves the video object to the new category folder
    #[schema(example = "sports")]
    pub category: Option<String>,
    pub description: Option<String>,
    /// JSON array (`["a","b"]`) or comma separated list
    pub tags: Option<String>,
}

/// Text fields of a new video, validated after multipart parsing
#[derive(Debug, Clone, Validate)]
pub struct VideoDetailsDto {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(regex(path = *CATEGORY_REGEX, message = "Category must be a lowercase slug (e.g. \"music\")"))]
    pub category: String,

    #[validate(length(min = 1, max = 500, message = "Description must be 1-500 characters"))]
    pub description: String,

    pub tags: Vec<String>,
}

/// Text fields of a video edit
#[derive(Debug, Clone, Default, Validate)]
pub struct VideoChangesDto {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,

    #[validate(regex(path = *CATEGORY_REGEX, message = "Category must be a lowercase slug (e.g. \"music\")"))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 500, message = "Description must be 1-500 characters"))]
    pub description: Option<String>,

    pub tags: Option<Vec<String>>,
}

/// Request DTO for listing videos in a category
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct VideosByCategoryDto {
    #[validate(regex(path = *CATEGORY_REGEX, message = "Need valid category!"))]
    pub category: String,

    /// Defaults to 20, clamped to 1..=100
    pub limit: Option<i64>,
}

/// Request DTO for title search
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoSearchDto {
    #[validate(length(min = 1, max = 100, message = "Need valid search query!"))]
    pub search_query: String,

    /// Defaults to 20, clamped to 1..=100
    pub limit: Option<i64>,

    #[validate(regex(path = *CATEGORY_REGEX, message = "Need valid category!"))]
    pub category: Option<String>,
}

/// Response DTO for video
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponseDto {
    pub id: Uuid,
    /// Uploader
    pub user_id: Uuid,
    pub title: String,
    pub category: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail: Option<String>,
    pub views: i64,
    pub tags: Vec<String>,
    pub likes: Vec<Uuid>,
    pub likes_count: usize,
    /// Comment ids, oldest first
    pub comments: Vec<Uuid>,
    pub upload_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Video> for VideoResponseDto {
    fn from(v: Video) -> Self {
        Self {
            id: v.id,
            user_id: v.user_id,
            title: v.title,
            category: v.category,
            description: v.description,
            video_url: v.video_url,
            thumbnail: v.thumbnail_url,
            views: v.views,
            tags: v.tags,
            likes_count: v.likes.len(),
            likes: v.likes,
            comments: v.comment_ids,
            upload_date: v.upload_date,
            updated_at: v.updated_at,
        }
    }
}

/// Parse the `tags` form field.
///
/// Accepts a JSON array of strings or a comma separated list. Entries are
/// trimmed; blanks and duplicates are dropped.
pub fn parse_tags(raw: &str) -> Result<Vec<String>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let candidates: Vec<String> = if raw.starts_with('[') {
        serde_json::from_str(raw).map_err(|_| "Invalid tags format!".to_string())?
    } else {
        raw.split(',').map(str::to_string).collect()
    };

    let mut tags: Vec<String> = Vec::with_capacity(candidates.len());
    for tag in candidates {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    Ok(tags)
}
