//! Videos, likes and comments.
//!
//! Video files and thumbnails live in object storage under a per-category
//! folder; changing a video's category moves its object.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/v1/videoManagement/postVideo` | Multipart upload |
//! | GET | `/api/v1/videoManagement/video/{id}` | Fetch one video, counts a view |
//! | POST | `/api/v1/videoManagement/getVideoByCategory` | Newest videos in a category |
//! | POST | `/api/v1/videoManagement/getVideoBySearchQuery` | Title search |
//! | PATCH | `/api/v1/videoManagement/editPost/{id}` | Edit metadata, thumbnail or category |
//! | PATCH | `/api/v1/videoManagement/likePost/{id}` | Like |
//! | PATCH | `/api/v1/videoManagement/unLikePost/{id}` | Unlike |
//! | POST | `/api/v1/videoManagement/addComment/{id}` | Comment on a video |
//! | POST | `/api/v1/videoManagement/deleteComment/{id}` | Delete a comment |
//! | PATCH | `/api/v1/videoManagement/editComment/{id}` | Edit own comment |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::{CommentService, VideoService};
