pub mod user_handler;

pub use user_handler::{
    __path_follow_user, __path_get_user, __path_login, __path_register, __path_unfollow_user,
    follow_user, get_user, login, register, unfollow_user,
};
