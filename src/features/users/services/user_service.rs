use std::sync::Arc;

use uuid::Uuid;

use super::password;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::TokenService;
use crate::features::users::dtos::{
    LoginRequestDto, LoginResponseDto, RegisterRequestDto, UserResponseDto,
};
use crate::features::users::models::NewUser;
use crate::features::users::repositories::UserRepository;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Service for registration, login and the follow graph
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { repository, tokens }
    }

    pub async fn register(&self, dto: RegisterRequestDto) -> Result<UserResponseDto> {
        let email = normalize_email(&dto.email);

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let password_hash = run_blocking(move || password::hash_password(&dto.password)).await?;

        let user = self
            .repository
            .create(NewUser {
                user_name: dto.user_name.trim().to_string(),
                email,
                password_hash,
                profile_pic_url: dto.profile_pic_url,
                bio: dto.bio,
            })
            .await?;

        tracing::info!("Registered user {}", user.id);
        Ok(user.into())
    }

    /// Check credentials and issue a token pair.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let user = self
            .repository
            .find_by_email(&normalize_email(&dto.email))
            .await?
            .ok_or_else(|| AppError::BadRequest(INVALID_CREDENTIALS.to_string()))?;

        let stored_hash = user.password_hash.clone();
        let matches =
            run_blocking(move || password::verify_password(&dto.password, &stored_hash)).await?;
        if !matches {
            tracing::debug!("Login rejected for user {}", user.id);
            return Err(AppError::BadRequest(INVALID_CREDENTIALS.to_string()));
        }

        let pair = self.tokens.issue_tokens(user.id, &user.user_name).await?;

        Ok(LoginResponseDto {
            user: user.into(),
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.tokens.access_expires_in(),
        })
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<UserResponseDto> {
        self.repository
            .find_by_id(user_id)
            .await?
            .map(UserResponseDto::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// The caller starts following `target_id`; repeating is a no-op
    pub async fn follow(&self, caller: &AuthenticatedUser, target_id: Uuid) -> Result<()> {
        self.ensure_not_self(caller, target_id, "follow")?;

        if !self.repository.follow(caller.id, target_id).await? {
            return Err(AppError::NotFound("User not found!".to_string()));
        }

        tracing::debug!("User {} follows {}", caller.id, target_id);
        Ok(())
    }

    pub async fn unfollow(&self, caller: &AuthenticatedUser, target_id: Uuid) -> Result<()> {
        self.ensure_not_self(caller, target_id, "unfollow")?;

        if !self.repository.unfollow(caller.id, target_id).await? {
            return Err(AppError::NotFound("User not found!".to_string()));
        }

        tracing::debug!("User {} unfollowed {}", caller.id, target_id);
        Ok(())
    }

    fn ensure_not_self(
        &self,
        caller: &AuthenticatedUser,
        target_id: Uuid,
        action: &str,
    ) -> Result<()> {
        if caller.id == target_id {
            return Err(AppError::Validation(format!("You cannot {} yourself", action)));
        }
        Ok(())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Argon2 is CPU-bound; keep it off the async workers
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))?
}
