pub mod comment_handler;
mod multipart;
pub mod video_handler;

pub use comment_handler::{
    __path_add_comment, __path_delete_comment, __path_edit_comment, add_comment, delete_comment,
    edit_comment,
};
pub use video_handler::{
    __path_edit_video, __path_get_video, __path_get_videos_by_category, __path_like_video,
    __path_post_video, __path_search_videos, __path_unlike_video, edit_video, get_video,
    get_videos_by_category, like_video, post_video, search_videos, unlike_video,
};
