use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::videos::models::{NewVideo, Video, VideoUpdate};

/// Content store: video metadata with like and comment sets.
///
/// Set mutations are single-statement updates so concurrent likes and
/// comments never lose each other's writes.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn create(&self, video: NewVideo) -> Result<Video>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>>;

    /// Newest first
    async fn find_by_category(&self, category: &str, limit: i64) -> Result<Vec<Video>>;

    /// Case-insensitive title substring match, newest first
    async fn search(&self, query: &str, category: Option<&str>, limit: i64)
        -> Result<Vec<Video>>;

    async fn update(&self, id: Uuid, update: VideoUpdate) -> Result<Option<Video>>;

    /// Add a user to the like set; no-op if already present
    async fn add_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Video>>;

    async fn remove_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Video>>;

    /// Append a comment id; `false` if the video is gone
    async fn push_comment(&self, id: Uuid, comment_id: Uuid) -> Result<bool>;

    /// Remove a comment id; `false` if the video is gone
    async fn pull_comment(&self, id: Uuid, comment_id: Uuid) -> Result<bool>;

    async fn increment_views(&self, id: Uuid) -> Result<Option<Video>>;
}

pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const VIDEO_COLUMNS: &str = "id, user_id, title, category, description, video_url, \
     thumbnail_url, views, tags, likes, comment_ids, upload_date, created_at, updated_at";

#[async_trait]
impl VideoRepository for PgVideoRepository {
    async fn create(&self, video: NewVideo) -> Result<Video> {
        let sql = format!(
            r#"
            INSERT INTO videos (user_id, title, category, description, video_url, thumbnail_url, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {VIDEO_COLUMNS}
            "#
        );

        let video = sqlx::query_as::<_, Video>(&sql)
            .bind(video.user_id)
            .bind(&video.title)
            .bind(&video.category)
            .bind(&video.description)
            .bind(&video.video_url)
            .bind(&video.thumbnail_url)
            .bind(&video.tags)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert video: {:?}", e);
                e
            })?;

        Ok(video)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>> {
        let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1");

        let video = sqlx::query_as::<_, Video>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    async fn find_by_category(&self, category: &str, limit: i64) -> Result<Vec<Video>> {
        let sql = format!(
            r#"
            SELECT {VIDEO_COLUMNS}
            FROM videos
            WHERE category = $1
            ORDER BY upload_date DESC
            LIMIT $2
            "#
        );

        let videos = sqlx::query_as::<_, Video>(&sql)
            .bind(category)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(videos)
    }

    async fn search(
        &self,
        query: &str,
        category: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Video>> {
        let sql = format!(
            r#"
            SELECT {VIDEO_COLUMNS}
            FROM videos
            WHERE strpos(lower(title), lower($1)) > 0
              AND ($2::text IS NULL OR category = $2)
            ORDER BY upload_date DESC
            LIMIT $3
            "#
        );

        let videos = sqlx::query_as::<_, Video>(&sql)
            .bind(query)
            .bind(category)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(videos)
    }

    async fn update(&self, id: Uuid, update: VideoUpdate) -> Result<Option<Video>> {
        let sql = format!(
            r#"
            UPDATE videos
            SET title = $2, category = $3, description = $4, tags = $5,
                video_url = $6, thumbnail_url = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {VIDEO_COLUMNS}
            "#
        );

        let video = sqlx::query_as::<_, Video>(&sql)
            .bind(id)
            .bind(&update.title)
            .bind(&update.category)
            .bind(&update.description)
            .bind(&update.tags)
            .bind(&update.video_url)
            .bind(&update.thumbnail_url)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    async fn add_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Video>> {
        let sql = format!(
            r#"
            UPDATE videos
            SET likes = CASE WHEN $2 = ANY(likes) THEN likes ELSE array_append(likes, $2) END
            WHERE id = $1
            RETURNING {VIDEO_COLUMNS}
            "#
        );

        let video = sqlx::query_as::<_, Video>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    async fn remove_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Video>> {
        let sql = format!(
            r#"
            UPDATE videos
            SET likes = array_remove(likes, $2)
            WHERE id = $1
            RETURNING {VIDEO_COLUMNS}
            "#
        );

        let video = sqlx::query_as::<_, Video>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    async fn push_comment(&self, id: Uuid, comment_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET comment_ids = CASE WHEN $2 = ANY(comment_ids) THEN comment_ids
                                   ELSE array_append(comment_ids, $2) END
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(comment_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn pull_comment(&self, id: Uuid, comment_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET comment_ids = array_remove(comment_ids, $2)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(comment_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<Video>> {
        let sql = format!(
            r#"
            UPDATE videos
            SET views = views + 1
            WHERE id = $1
            RETURNING {VIDEO_COLUMNS}
            "#
        );

        let video = sqlx::query_as::<_, Video>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }
}
