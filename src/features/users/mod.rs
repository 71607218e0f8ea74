//! User accounts and the follow graph.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/v1/userManagement/register` | Create an account |
//! | POST | `/api/v1/userManagement/login` | Verify credentials, issue tokens |
//! | GET | `/api/v1/userManagement/user/{userId}` | Public profile with follow counts |
//! | POST | `/api/v1/userManagement/followUser` | Caller follows `userId` |
//! | POST | `/api/v1/userManagement/unFollowUser` | Caller unfollows `userId` |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::UserService;
