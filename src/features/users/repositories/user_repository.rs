use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{is_unique_violation, AppError, Result};
use crate::features::users::models::{NewUser, User};

/// Credential store: user records and the follow graph
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; a duplicate email is `Conflict`
    async fn create(&self, user: NewUser) -> Result<User>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Add `follower_id` to `target_id`'s followers and `target_id` to
    /// `follower_id`'s following. Returns `false` if either user is missing.
    async fn follow(&self, follower_id: Uuid, target_id: Uuid) -> Result<bool>;

    /// Inverse of [`UserRepository::follow`]
    async fn unfollow(&self, follower_id: Uuid, target_id: Uuid) -> Result<bool>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply both halves of a follow-graph change in one transaction
    async fn update_follow_sets(
        &self,
        follower_id: Uuid,
        target_id: Uuid,
        follower_sql: &str,
        target_sql: &str,
    ) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let locked: Vec<Uuid> =
            sqlx::query_scalar("SELECT id FROM users WHERE id = ANY($1) ORDER BY id FOR UPDATE")
                .bind(vec![follower_id, target_id])
                .fetch_all(&mut *tx)
                .await?;

        if locked.len() != 2 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(follower_sql)
            .bind(follower_id)
            .bind(target_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(target_sql)
            .bind(target_id)
            .bind(follower_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}

const USER_COLUMNS: &str = "id, user_name, email, password_hash, profile_pic_url, bio, \
     followers, following, created_at, updated_at";

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<User> {
        let sql = format!(
            r#"
            INSERT INTO users (user_name, email, password_hash, profile_pic_url, bio)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(&user.user_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.profile_pic_url)
            .bind(&user.bio)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Email already exists".to_string())
                } else {
                    tracing::error!("Failed to create user: {:?}", e);
                    AppError::Database(e)
                }
            })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn follow(&self, follower_id: Uuid, target_id: Uuid) -> Result<bool> {
        self.update_follow_sets(
            follower_id,
            target_id,
            r#"
            UPDATE users
            SET following = array_append(following, $2), updated_at = NOW()
            WHERE id = $1 AND NOT ($2 = ANY(following))
            "#,
            r#"
            UPDATE users
            SET followers = array_append(followers, $2), updated_at = NOW()
            WHERE id = $1 AND NOT ($2 = ANY(followers))
            "#,
        )
        .await
    }

    async fn unfollow(&self, follower_id: Uuid, target_id: Uuid) -> Result<bool> {
        self.update_follow_sets(
            follower_id,
            target_id,
            r#"
            UPDATE users
            SET following = array_remove(following, $2), updated_at = NOW()
            WHERE id = $1
            "#,
            r#"
            UPDATE users
            SET followers = array_remove(followers, $2), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .await
    }
}
