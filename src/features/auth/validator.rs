use super::model::{AuthenticatedUser, TokenClaims};
use crate::core::config::AuthTokenConfig;
use crate::core::error::AppError;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

/// Verifies HS256 tokens against the access and refresh secrets
pub struct JwtValidator {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(config: &AuthTokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway.as_secs();
        validation.set_required_spec_claims(&["exp"]);

        Self {
            access_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            validation,
        }
    }

    /// Verify a bearer token presented on a protected route
    pub fn validate_access_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        self.decode_claims(token, &self.access_key)
            .map(AuthenticatedUser::from)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token expired. Please log in again.".to_string())
                }
                _ => {
                    tracing::debug!("Access token rejected: {}", e);
                    AppError::Forbidden("Invalid token.".to_string())
                }
            })
    }

    /// Verify a refresh token's signature and expiry.
    ///
    /// Callers check the persisted record first; any failure here is `Forbidden`.
    pub fn validate_refresh_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        self.decode_claims(token, &self.refresh_key).map_err(|e| {
            tracing::debug!("Refresh token rejected: {}", e);
            AppError::Forbidden("Invalid refresh token".to_string())
        })
    }

    fn decode_claims(&self, token: &str, key: &DecodingKey) -> Result<TokenClaims, JwtError> {
        decode::<TokenClaims>(token, key, &self.validation).map(|data| data.claims)
    }
}
