mod refresh_token_repository;

#[cfg(test)]
pub mod memory;

pub use refresh_token_repository::{PgRefreshTokenRepository, RefreshTokenRepository};
