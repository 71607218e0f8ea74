pub mod token_handler;

pub use token_handler::{__path_revoke_token, __path_update_access_token, revoke_token, update_access_token};
