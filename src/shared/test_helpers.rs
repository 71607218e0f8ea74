//! Service graph wired to in-memory stores for unit and router tests

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use fake::faker::name::en::FirstName;
use fake::Fake;
use uuid::Uuid;

use crate::core::app::{self, ApiServices};
use crate::core::config::AuthTokenConfig;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::repositories::memory::InMemoryRefreshTokenRepository;
use crate::features::auth::{JwtValidator, TokenService};
use crate::features::users::dtos::{RegisterRequestDto, UserResponseDto};
use crate::features::users::repositories::memory::InMemoryUserRepository;
use crate::features::users::UserService;
use crate::features::videos::dtos::{VideoDetailsDto, VideoResponseDto};
use crate::features::videos::repositories::memory::{
    InMemoryCommentRepository, InMemoryVideoRepository,
};
use crate::features::videos::{CommentService, VideoService};
use crate::modules::storage::memory::{InMemoryObjectStore, InMemoryOrphanLedger};
use crate::modules::storage::{ObjectRelocator, UploadPayload};

pub const PUBLIC_BASE_URL: &str = "https://videoappstorage.s3.us-east-1.amazonaws.com";
pub const TEST_PASSWORD: &str = "password123";
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

pub struct TestContext {
    pub jwt_validator: Arc<JwtValidator>,
    pub token_service: Arc<TokenService>,
    pub user_service: Arc<UserService>,
    pub video_service: Arc<VideoService>,
    pub comment_service: Arc<CommentService>,
    pub relocator: Arc<ObjectRelocator>,
    pub store: Arc<InMemoryObjectStore>,
    pub orphans: Arc<InMemoryOrphanLedger>,
    pub videos: Arc<InMemoryVideoRepository>,
    pub comments: Arc<InMemoryCommentRepository>,
}

impl TestContext {
    pub fn new() -> Self {
        let config = AuthTokenConfig::new(
            "test-access-secret".to_string(),
            "test-refresh-secret".to_string(),
            Duration::from_secs(7200),
            Duration::from_secs(30 * 24 * 3600),
            Duration::ZERO,
        )
        .unwrap();

        let jwt_validator = Arc::new(JwtValidator::new(&config));
        let token_service = Arc::new(TokenService::new(
            config,
            jwt_validator.clone(),
            Arc::new(InMemoryRefreshTokenRepository::new()),
        ));

        let user_service = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            token_service.clone(),
        ));

        let store = Arc::new(InMemoryObjectStore::new());
        let orphans = Arc::new(InMemoryOrphanLedger::new());
        let relocator = Arc::new(ObjectRelocator::new(
            store.clone(),
            orphans.clone(),
            PUBLIC_BASE_URL,
        ));

        let videos = Arc::new(InMemoryVideoRepository::new());
        let comments = Arc::new(InMemoryCommentRepository::new());
        let video_service = Arc::new(VideoService::new(videos.clone(), relocator.clone()));
        let comment_service = Arc::new(CommentService::new(comments.clone(), videos.clone()));

        Self {
            jwt_validator,
            token_service,
            user_service,
            video_service,
            comment_service,
            relocator,
            store,
            orphans,
            videos,
            comments,
        }
    }

    /// A caller identity that has no user record behind it
    pub fn user(&self, name: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            user_name: name.to_string(),
        }
    }

    /// Register a user with a generated name and [`TEST_PASSWORD`]
    pub async fn register(&self, email: &str) -> UserResponseDto {
        self.user_service
            .register(RegisterRequestDto {
                user_name: FirstName().fake(),
                email: email.to_string(),
                password: TEST_PASSWORD.to_string(),
                profile_pic_url: None,
                bio: None,
            })
            .await
            .unwrap()
    }

    pub async fn upload(
        &self,
        owner: &AuthenticatedUser,
        title: &str,
        category: &str,
        file_name: &str,
    ) -> VideoResponseDto {
        self.video_service
            .upload(
                owner,
                VideoDetailsDto {
                    title: title.to_string(),
                    category: category.to_string(),
                    description: format!("{} description", title),
                    tags: Vec::new(),
                },
                payload(file_name),
                None,
            )
            .await
            .unwrap()
    }

    /// Full API router over the in-memory services
    pub fn router(&self) -> Router {
        self.router_with_upload_limit(MAX_UPLOAD_SIZE)
    }

    pub fn router_with_upload_limit(&self, max_upload_size: usize) -> Router {
        let services = ApiServices {
            jwt_validator: self.jwt_validator.clone(),
            token_service: self.token_service.clone(),
            user_service: self.user_service.clone(),
            video_service: self.video_service.clone(),
            comment_service: self.comment_service.clone(),
        };
        app::api_routes(&services, max_upload_size)
    }
}

/// A small file whose content type follows its extension
pub fn payload(file_name: &str) -> UploadPayload {
    let content_type = match file_name.rsplit('.').next() {
        Some("mp4") => "video/mp4",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    };

    UploadPayload {
        file_name: file_name.to_string(),
        content_type: content_type.to_string(),
        data: file_name.as_bytes().to_vec(),
    }
}
