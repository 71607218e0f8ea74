//! S3 storage client
//!
//! Thin wrapper over the rust-s3 `Bucket` implementing [`ObjectStore`].
//! Works against AWS S3 or any S3-compatible endpoint (MinIO, localstack).

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use tracing::{debug, info, warn};

use crate::core::config::S3Config;
use crate::core::error::{AppError, Result};
use crate::modules::storage::ObjectStore;

/// S3 storage client
pub struct S3Client {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    path_style: bool,
}

impl S3Client {
    /// Create a new S3 client from configuration
    pub fn new(config: &S3Config) -> Result<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create S3 credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.api_endpoint(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to create S3 bucket handle: {}", e)))?;

        if config.path_style {
            bucket.set_path_style();
        }

        info!(
            "S3 client initialized for endpoint: {}, bucket: {}, path_style: {}",
            config.api_endpoint(),
            config.bucket,
            config.path_style
        );

        Ok(Self {
            bucket,
            region,
            credentials,
            path_style: config.path_style,
        })
    }

    /// Ensure the bucket exists, create if not.
    ///
    /// Only meaningful for self-hosted S3-compatible stores; failures are logged
    /// and startup continues on the assumption that the bucket exists.
    pub async fn ensure_bucket_exists(&self) {
        if !self.path_style {
            return;
        }

        let result = Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await;

        match result {
            Ok(_) => info!("Bucket '{}' created successfully", self.bucket.name()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                }
            }
        }
    }

    /// Get the bucket name
    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }

    fn check_status(operation: &str, key: &str, status: u16) -> Result<()> {
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(AppError::Storage(format!(
                "{} '{}' returned HTTP {}",
                operation, key, status
            )))
        }
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<()> {
        let response = self
            .bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload '{}': {}", key, e)))?;
        Self::check_status("Upload of", key, response.status_code())?;

        debug!("Uploaded '{}' to bucket '{}'", key, self.bucket.name());
        Ok(())
    }

    async fn copy(&self, from_key: &str, to_key: &str) -> Result<()> {
        let status = self
            .bucket
            .copy_object_internal(from_key, to_key)
            .await
            .map_err(|e| {
                AppError::Storage(format!(
                    "Failed to copy '{}' to '{}': {}",
                    from_key, to_key, e
                ))
            })?;
        Self::check_status("Copy of", from_key, status)?;

        debug!(
            "Copied '{}' to '{}' in bucket '{}'",
            from_key,
            to_key,
            self.bucket.name()
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let response = self
            .bucket
            .delete_object(key)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to delete '{}': {}", key, e)))?;
        Self::check_status("Delete of", key, response.status_code())?;

        debug!("Deleted '{}' from bucket '{}'", key, self.bucket.name());
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        match self.bucket.head_object(key).await {
            Ok((_, 404)) => Ok(false),
            Ok((_, status)) => Self::check_status("Head of", key, status).map(|_| true),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("404") || error_str.contains("NoSuchKey") {
                    Ok(false)
                } else {
                    Err(AppError::Storage(format!(
                        "Failed to check if '{}' exists: {}",
                        key, e
                    )))
                }
            }
        }
    }
}
