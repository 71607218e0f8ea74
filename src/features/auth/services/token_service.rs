use crate::core::config::AuthTokenConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::TokenClaims;
use crate::features::auth::repositories::RefreshTokenRepository;
use crate::features::auth::JwtValidator;
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

/// Access and refresh token issued at login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues, renews and revokes HS256 session tokens.
///
/// Refresh tokens are persisted as SHA-256 digests; the raw token only ever
/// leaves the service in the login response.
pub struct TokenService {
    config: AuthTokenConfig,
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    validator: Arc<JwtValidator>,
    repository: Arc<dyn RefreshTokenRepository>,
}

impl TokenService {
    pub fn new(
        config: AuthTokenConfig,
        validator: Arc<JwtValidator>,
        repository: Arc<dyn RefreshTokenRepository>,
    ) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            config,
            validator,
            repository,
        }
    }

    /// Sign a fresh token pair and persist the refresh half
    pub async fn issue_tokens(&self, user_id: Uuid, user_name: &str) -> Result<TokenPair> {
        let now = Utc::now();

        let access_token = self.sign_access(user_id, user_name, now)?;

        let refresh_expires = now + chrono_duration(self.config.refresh_ttl)?;
        let refresh_claims = TokenClaims {
            id: user_id,
            user_name: user_name.to_string(),
            iat: now.timestamp(),
            exp: refresh_expires.timestamp(),
            jti: Some(Uuid::new_v4()),
        };
        let refresh_token = encode(&Header::default(), &refresh_claims, &self.refresh_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign refresh token: {}", e)))?;

        self.repository
            .store(user_id, &hash_token(&refresh_token), refresh_expires)
            .await?;

        tracing::debug!("Issued token pair for user {}", user_id);

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Exchange a stored, unexpired refresh token for a new access token
    pub async fn renew_access_token(&self, refresh_token: &str) -> Result<String> {
        let now = Utc::now();

        let stored = self
            .repository
            .find_active(&hash_token(refresh_token))
            .await?
            .filter(|token| !token.is_expired(now))
            .ok_or_else(|| {
                AppError::Unauthorized("Invalid or expired refresh token".to_string())
            })?;

        let claims = self.validator.validate_refresh_token(refresh_token)?;

        if claims.id != stored.user_id {
            tracing::warn!(
                "Refresh token {} claims user {} but belongs to {}",
                stored.id,
                claims.id,
                stored.user_id
            );
            return Err(AppError::Forbidden("Invalid refresh token".to_string()));
        }

        self.sign_access(claims.id, &claims.user_name, now)
    }

    /// Revoke a refresh token (logout)
    pub async fn revoke(&self, refresh_token: &str) -> Result<()> {
        if !self.repository.revoke(&hash_token(refresh_token)).await? {
            return Err(AppError::NotFound("Refresh token not found".to_string()));
        }

        tracing::info!("Refresh token revoked");
        Ok(())
    }

    /// Access token lifetime in seconds, reported to clients
    pub fn access_expires_in(&self) -> i64 {
        self.config.access_ttl.as_secs() as i64
    }

    fn sign_access(&self, user_id: Uuid, user_name: &str, now: DateTime<Utc>) -> Result<String> {
        let claims = TokenClaims {
            id: user_id,
            user_name: user_name.to_string(),
            iat: now.timestamp(),
            exp: (now + chrono_duration(self.config.access_ttl)?).timestamp(),
            jti: None,
        };

        encode(&Header::default(), &claims, &self.access_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign access token: {}", e)))
    }
}

/// Lookup digest for a refresh token
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn chrono_duration(duration: std::time::Duration) -> Result<chrono::Duration> {
    chrono::Duration::from_std(duration)
        .map_err(|e| AppError::Internal(format!("Token lifetime out of range: {}", e)))
}
