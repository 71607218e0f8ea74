use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::RefreshToken;
use crate::features::auth::repositories::RefreshTokenRepository;

#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: Mutex<Vec<RefreshToken>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<RefreshToken> {
        self.tokens.lock().unwrap().clone()
    }

    /// Move a stored token's expiry, for expiry tests
    pub fn set_expiry(&self, token_hash: &str, expires_at: DateTime<Utc>) {
        for token in self.tokens.lock().unwrap().iter_mut() {
            if token.token_hash == token_hash {
                token.expires_at = expires_at;
            }
        }
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn store(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        self.tokens.lock().unwrap().push(RefreshToken {
            id: Uuid::new_v4(),
            user_id,
            token_hash: token_hash.to_string(),
            expires_at,
            revoked: false,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn find_active(&self, token_hash: &str) -> Result<Option<RefreshToken>> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token_hash == token_hash && !t.revoked)
            .cloned())
    }

    async fn revoke(&self, token_hash: &str) -> Result<bool> {
        let mut tokens = self.tokens.lock().unwrap();
        match tokens
            .iter_mut()
            .find(|t| t.token_hash == token_hash && !t.revoked)
        {
            Some(token) => {
                token.revoked = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
