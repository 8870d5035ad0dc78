//! Configuration module
//!
//! Settings are read from the process environment (with `.env` support through `dotenvy`).
//! Parsing goes through a lookup function so the same rules can be exercised against a plain
//! map in tests.

use std::env;
use std::path::PathBuf;

use crate::storage_types::StorageBackend;

// Common constants
const DEFAULT_PORT: u16 = 8091;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 24;
const MAX_THUMBNAIL_SIZE_MB: usize = 10;
const MAX_VIDEO_SIZE_MB: usize = 1024;
const MIN_JWT_SECRET_LEN: usize = 32;

/// Settings shared by every service binary
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub environment: String,
}

/// Upload pipeline settings: where objects go and how large they may be
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    pub assets_root: String,
    pub assets_base_url: String,
    pub max_thumbnail_size_bytes: usize,
    pub max_video_size_bytes: usize,
    pub ffprobe_path: String,
    /// Where video payloads are staged before probing; the system temp dir when unset.
    pub staging_dir: Option<String>,
}

#[derive(Clone, Debug)]
pub struct UploadServiceConfig {
    pub base: BaseConfig,
    pub database_url: String,
    pub upload: UploadConfig,
}

/// Application configuration (upload service).
#[derive(Clone, Debug)]
pub struct Config(pub Box<UploadServiceConfig>);

impl Config {
    fn as_service(&self) -> &UploadServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.as_service().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup and validate it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = UploadServiceConfig::from_lookup(lookup)?;
        config.validate()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_service().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_service().base.server_port
    }

    pub fn jwt_secret(&self) -> &str {
        &self.as_service().base.jwt_secret
    }

    pub fn jwt_expiry_hours(&self) -> i64 {
        self.as_service().base.jwt_expiry_hours
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_service().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_service().base.environment
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_service().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_service().base.db_timeout_seconds
    }

    pub fn database_url(&self) -> &str {
        &self.as_service().database_url
    }

    pub fn upload(&self) -> &UploadConfig {
        &self.as_service().upload
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_service().upload.storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_service().upload.s3_bucket.as_deref()
    }

    /// `S3_REGION` wins over `AWS_REGION`.
    pub fn s3_region(&self) -> Option<&str> {
        let upload = &self.as_service().upload;
        upload.s3_region.as_deref().or(upload.aws_region.as_deref())
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_service().upload.s3_endpoint.as_deref()
    }

    pub fn assets_root(&self) -> &str {
        &self.as_service().upload.assets_root
    }

    pub fn assets_base_url(&self) -> &str {
        &self.as_service().upload.assets_base_url
    }

    pub fn max_thumbnail_size_bytes(&self) -> usize {
        self.as_service().upload.max_thumbnail_size_bytes
    }

    pub fn max_video_size_bytes(&self) -> usize {
        self.as_service().upload.max_video_size_bytes
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.as_service().upload.ffprobe_path
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.as_service()
            .upload
            .staging_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir)
    }
}

fn is_production_env(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl UploadServiceConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = non_empty(&lookup, "ENVIRONMENT")
            .or_else(|| non_empty(&lookup, "APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_env(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port: u16 = match non_empty(&lookup, "PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => DEFAULT_PORT,
        };

        let base = BaseConfig {
            server_port,
            cors_origins,
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: lookup("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret: non_empty(&lookup, "JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            jwt_expiry_hours: lookup("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|| JWT_EXPIRY_HOURS.to_string())
                .parse()
                .unwrap_or(JWT_EXPIRY_HOURS),
            environment,
        };

        let database_url = non_empty(&lookup, "DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let storage_backend = match non_empty(&lookup, "STORAGE_BACKEND") {
            Some(raw) => raw.parse::<StorageBackend>()?,
            None => StorageBackend::Local,
        };

        let max_thumbnail_size_mb = lookup("MAX_THUMBNAIL_SIZE_MB")
            .unwrap_or_else(|| MAX_THUMBNAIL_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_THUMBNAIL_SIZE_MB);

        let max_video_size_mb = lookup("MAX_VIDEO_SIZE_MB")
            .unwrap_or_else(|| MAX_VIDEO_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_VIDEO_SIZE_MB);

        let assets_base_url = non_empty(&lookup, "ASSETS_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{}/assets", base.server_port));

        let upload = UploadConfig {
            storage_backend,
            s3_bucket: non_empty(&lookup, "S3_BUCKET"),
            s3_region: non_empty(&lookup, "S3_REGION"),
            s3_endpoint: non_empty(&lookup, "S3_ENDPOINT"),
            aws_region: non_empty(&lookup, "AWS_REGION"),
            assets_root: non_empty(&lookup, "ASSETS_ROOT")
                .unwrap_or_else(|| "./assets".to_string()),
            assets_base_url: assets_base_url.trim_end_matches('/').to_string(),
            max_thumbnail_size_bytes: max_thumbnail_size_mb.saturating_mul(1024 * 1024),
            max_video_size_bytes: max_video_size_mb.saturating_mul(1024 * 1024),
            ffprobe_path: non_empty(&lookup, "FFPROBE_PATH")
                .unwrap_or_else(|| "ffprobe".to_string()),
            staging_dir: non_empty(&lookup, "UPLOAD_STAGING_DIR"),
        };

        Ok(UploadServiceConfig {
            base,
            database_url,
            upload,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            ));
        }

        if !self.database_url.starts_with("postgresql://")
            && !self.database_url.starts_with("postgres://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.upload.max_thumbnail_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_THUMBNAIL_SIZE_MB must be greater than 0"));
        }
        if self.upload.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_VIDEO_SIZE_MB must be greater than 0"));
        }

        // Validate storage backend configuration
        match self.upload.storage_backend {
            StorageBackend::S3 => {
                if self.upload.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.upload.s3_region.is_none() && self.upload.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.upload.assets_root.is_empty() {
                    return Err(anyhow::anyhow!(
                        "ASSETS_ROOT must be set when using local storage backend"
                    ));
                }
            }
            StorageBackend::Inline => {}
        }

        Ok(())
    }
}
