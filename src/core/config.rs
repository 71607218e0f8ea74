use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth_token: AuthTokenConfig,
    pub s3: S3Config,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// Upper bound for multipart upload bodies (video + thumbnail)
    pub max_upload_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Signing material and lifetimes for access and refresh tokens
#[derive(Clone)]
pub struct AuthTokenConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub leeway: Duration,
}

// Secrets stay out of logs
impl std::fmt::Debug for AuthTokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTokenConfig")
            .field("access_secret", &"***")
            .field("refresh_secret", &"***")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("leeway", &self.leeway)
            .finish()
    }
}

/// S3 bucket configuration for video and thumbnail objects
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Bucket name
    pub bucket: String,
    /// AWS region, also used to build public object URLs
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    /// Custom endpoint for S3-compatible stores (MinIO, localstack)
    pub endpoint: Option<String>,
    /// Base URL objects are publicly served from, without trailing slash
    pub public_base_url: String,
    /// Use path-style addressing (required by most S3-compatible stores)
    pub path_style: bool,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth_token: AuthTokenConfig::from_env()?,
            s3: S3Config::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_UPLOAD_SIZE: usize = 200 * 1024 * 1024; // 200MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3003".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size = env::var("MAX_UPLOAD_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_UPLOAD_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_UPLOAD_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_upload_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl AuthTokenConfig {
    const DEFAULT_ACCESS_TTL_SECS: u64 = 2 * 60 * 60; // 2 hours
    const DEFAULT_REFRESH_TTL_SECS: u64 = 30 * 24 * 60 * 60; // 30 days
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let access_secret = env::var("ACCESS_TOKEN_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "ACCESS_TOKEN_SECRET environment variable is required".to_string())?;

        let refresh_secret = env::var("REFRESH_TOKEN_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "REFRESH_TOKEN_SECRET environment variable is required".to_string())?;

        let access_ttl_secs = env::var("ACCESS_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACCESS_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "ACCESS_TOKEN_TTL_SECS must be a valid number".to_string())?;

        let refresh_ttl_secs = env::var("REFRESH_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REFRESH_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "REFRESH_TOKEN_TTL_SECS must be a valid number".to_string())?;

        let leeway_secs = env::var("JWT_LEEWAY")
            .unwrap_or_else(|_| Self::DEFAULT_JWT_LEEWAY_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_LEEWAY must be a valid number".to_string())?;

        Self::new(
            access_secret,
            refresh_secret,
            Duration::from_secs(access_ttl_secs),
            Duration::from_secs(refresh_ttl_secs),
            Duration::from_secs(leeway_secs),
        )
    }

    pub fn new(
        access_secret: String,
        refresh_secret: String,
        access_ttl: Duration,
        refresh_ttl: Duration,
        leeway: Duration,
    ) -> Result<Self, String> {
        // A shared secret would let a refresh token pass as an access token
        if access_secret == refresh_secret {
            return Err(
                "ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must be different".to_string(),
            );
        }

        Ok(Self {
            access_secret,
            refresh_secret,
            access_ttl,
            refresh_ttl,
            leeway,
        })
    }
}

impl S3Config {
    pub fn from_env() -> Result<Self, String> {
        let bucket = env::var("S3_BUCKET").unwrap_or_else(|_| "videoappstorage".to_string());

        let region = env::var("AWS_REGION")
            .map_err(|_| "AWS_REGION environment variable is required".to_string())?;

        let access_key = env::var("AWS_ACCESS_KEY_ID")
            .map_err(|_| "AWS_ACCESS_KEY_ID environment variable is required".to_string())?;

        let secret_key = env::var("AWS_SECRET_ACCESS_KEY")
            .map_err(|_| "AWS_SECRET_ACCESS_KEY environment variable is required".to_string())?;

        let endpoint = env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty());

        let public_base_url = env::var("S3_PUBLIC_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| Self::default_public_base_url(&bucket, &region));

        let path_style = env::var("S3_PATH_STYLE")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(endpoint.is_some());

        Ok(Self {
            bucket,
            region,
            access_key,
            secret_key,
            endpoint,
            public_base_url,
            path_style,
        })
    }

    /// Virtual-hosted AWS URL: `https://{bucket}.s3.{region}.amazonaws.com`
    pub fn default_public_base_url(bucket: &str, region: &str) -> String {
        format!("https://{}.s3.{}.amazonaws.com", bucket, region)
    }

    /// Endpoint the S3 client talks to
    pub fn api_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://s3.{}.amazonaws.com", self.region))
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Clipstream API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the Clipstream video service".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
