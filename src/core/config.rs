use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
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

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Shared HS256 secret used to verify admin access tokens
    pub jwt_secret: String,
    pub jwt_leeway: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Local upload storage configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory that contains the `uploads/` tree. Stored media paths are relative to it.
    pub base_dir: PathBuf,
    /// Maximum size of a single uploaded media file in bytes
    pub max_file_size: usize,
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
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            upload: UploadConfig::from_env()?,
        })
    }
}

/// Reads `key` and parses it, falling back to `default` when unset
fn env_or<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => parse_var(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| format!("{} has an invalid value `{}`: {}", key, raw, e))
}

/// Comma separated list; blank entries are dropped
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let origins =
            env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".into());

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("PORT", 8000)?,
            cors_allowed_origins: split_list(&origins),
            max_request_body_size: env_or(
                "MAX_REQUEST_BODY_SIZE",
                Self::DEFAULT_MAX_REQUEST_BODY_SIZE,
            )?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        Ok(Self {
            url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 10)?,
            min_connections: env_or("DB_MIN_CONNECTIONS", 1)?,
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 5)?,
            idle_timeout_secs: env_or("DB_IDLE_TIMEOUT_SECS", 600)?,
            max_lifetime_secs: env_or("DB_MAX_LIFETIME_SECS", 1800)?,
        })
    }
}

impl AuthConfig {
    const MIN_SECRET_LEN: usize = 32;

    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET environment variable is required".to_string())?;

        Self::new(jwt_secret, env_or("JWT_LEEWAY", 60)?)
    }

    fn new(jwt_secret: String, leeway_secs: u64) -> Result<Self, String> {
        if jwt_secret.len() < Self::MIN_SECRET_LEN {
            return Err(format!(
                "JWT_SECRET must be at least {} characters",
                Self::MIN_SECRET_LEN
            ));
        }

        Ok(Self {
            jwt_secret,
            jwt_leeway: Duration::from_secs(leeway_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        let non_empty = |key: &str| env::var(key).ok().filter(|s| !s.is_empty());

        Ok(Self {
            username: non_empty("SWAGGER_USERNAME"),
            password: non_empty("SWAGGER_PASSWORD"),
            title: non_empty("SWAGGER_TITLE").unwrap_or_else(|| "ContentHub API".to_string()),
            version: non_empty("SWAGGER_VERSION").unwrap_or_else(|| "1.0".to_string()),
            description: non_empty("SWAGGER_DESCRIPTION")
                .unwrap_or_else(|| "Categories, blogs and feedback".to_string()),
        })
    }

    /// `username:password` when both are configured
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl UploadConfig {
    const DEFAULT_MAX_FILE_SIZE: usize = 50 * 1024 * 1024; // 50MB, videos are allowed

    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            base_dir: env::var("UPLOAD_BASE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            max_file_size: env_or("MAX_UPLOAD_FILE_SIZE", Self::DEFAULT_MAX_FILE_SIZE)?,
        })
    }
}
