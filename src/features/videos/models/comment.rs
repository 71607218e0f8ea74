use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for comment
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
}
