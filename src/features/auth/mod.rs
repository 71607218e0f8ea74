//! Session tokens.
//!
//! Access tokens (HS256, short-lived) authenticate protected routes through
//! `core::middleware::auth_middleware`. Refresh tokens (HS256, long-lived,
//! separate secret) are persisted as digests and exchanged for new access
//! tokens under `/api/v1/tokenManagement`.

mod validator;

pub mod dtos;
pub mod handlers;
pub mod model;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::TokenService;
pub use validator::JwtValidator;
