mod user_repository;

#[cfg(test)]
pub mod memory;

pub use user_repository::{PgUserRepository, UserRepository};
