use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::videos::models::{Comment, NewComment};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: NewComment) -> Result<Comment>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>>;

    async fn update_body(&self, id: Uuid, body: &str) -> Result<Option<Comment>>;

    /// Delete and return the removed row
    async fn delete(&self, id: Uuid) -> Result<Option<Comment>>;

    /// Re-insert a previously deleted comment with its original id and timestamps
    async fn restore(&self, comment: &Comment) -> Result<()>;
}

pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (video_id, user_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, video_id, user_id, body, created_at, updated_at
            "#,
        )
        .bind(comment.video_id)
        .bind(comment.user_id)
        .bind(&comment.body)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, video_id, user_id, body, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn update_body(&self, id: Uuid, body: &str) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET body = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, video_id, user_id, body, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(body)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            DELETE FROM comments
            WHERE id = $1
            RETURNING id, video_id, user_id, body, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn restore(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, video_id, user_id, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(comment.id)
        .bind(comment.video_id)
        .bind(comment.user_id)
        .bind(&comment.body)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
