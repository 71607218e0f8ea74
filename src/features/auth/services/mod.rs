mod token_service;

pub use token_service::{hash_token, TokenPair, TokenService};
