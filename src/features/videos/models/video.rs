use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for video metadata
#[derive(Debug, Clone, FromRow)]
pub struct Video {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub category: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub views: i64,
    pub tags: Vec<String>,
    pub likes: Vec<Uuid>,
    /// Comment ids in insertion order
    pub comment_ids: Vec<Uuid>,
    pub upload_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVideo {
    pub user_id: Uuid,
    pub title: String,
    pub category: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub tags: Vec<String>,
}

/// Resolved field values written by an edit
#[derive(Debug, Clone)]
pub struct VideoUpdate {
    pub title: String,
    pub category: String,
    pub description: String,
    pub tags: Vec<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
}

impl VideoUpdate {
    /// Start from the current values so unset edit fields are kept
    pub fn from_video(video: &Video) -> Self {
        Self {
            title: video.title.clone(),
            category: video.category.clone(),
            description: video.description.clone(),
            tags: video.tags.clone(),
            video_url: video.video_url.clone(),
            thumbnail_url: video.thumbnail_url.clone(),
        }
    }
}
