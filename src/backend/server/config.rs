/**
 * Server Configuration
 *
 * This module loads the server configuration and opens the optional
 * PostgreSQL connection.
 *
 * # Configuration Sources
 *
 * - `APP_ENV=production`: secrets (`AWS_KEY`, `AWS_SECRET`,
 *   `SESSION_SECRET`) come from the process environment.
 * - otherwise: secrets come from a local TOML file (`SECRETS_FILE`,
 *   default `secrets.toml`).
 *
 * Everything else (port, bucket, directories, limits) is read from the
 * environment with defaults suitable for local development.
 *
 * # Error Handling
 *
 * Missing or malformed configuration fails startup with a `ConfigError`.
 * A missing or unreachable database does not: it is logged and the server
 * falls back to the in-memory credential store.
 */

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SECRETS_FILE: &str = "secrets.toml";
pub const DEFAULT_BUCKET: &str = "rksocialnetwork";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_S3_ENDPOINT: &str = "https://s3.amazonaws.com";
/// 2 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 2 * 1024 * 1024;
/// Sessions expire 14 days after they were issued.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(14 * 24 * 60 * 60);

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("cannot read secrets file {}: {source}", .path.display())]
    SecretsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed secrets file: {0}")]
    SecretsFormat(#[from] toml::de::Error),
}

/// Object-storage settings
#[derive(Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Base URL; objects live at `<endpoint>/<bucket>/<key>`
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
}

impl fmt::Debug for S3Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Config")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Complete server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Production mode: `Secure` cookies, secrets from the environment
    pub production: bool,
    pub port: u16,
    pub database_url: Option<String>,
    /// HMAC key for the session cookie
    pub session_secret: String,
    pub session_ttl: Duration,
    pub s3: S3Config,
    /// Where uploads are spooled before they are sent to storage
    pub upload_dir: PathBuf,
    pub max_upload_bytes: u64,
    /// Static assets served under `/static`
    pub public_dir: PathBuf,
    /// The single-page application shell
    pub index_html: PathBuf,
    pub bcrypt_cost: u32,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("production", &self.production)
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("session_secret", &"<redacted>")
            .field("session_ttl", &self.session_ttl)
            .field("s3", &self.s3)
            .field("upload_dir", &self.upload_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("public_dir", &self.public_dir)
            .field("index_html", &self.index_html)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Layout of the development secrets file
#[derive(Debug, Deserialize)]
struct Secrets {
    #[serde(default)]
    aws_key: String,
    #[serde(default)]
    aws_secret: String,
    session_secret: String,
}

impl Secrets {
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::SecretsFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&raw)?)
    }
}

fn parse_var<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load the configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration from an arbitrary key lookup
    ///
    /// `load` passes `std::env::var`; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let production = lookup("APP_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let secrets = if production {
            Secrets {
                aws_key: lookup("AWS_KEY").unwrap_or_default(),
                aws_secret: lookup("AWS_SECRET").unwrap_or_default(),
                session_secret: lookup("SESSION_SECRET")
                    .ok_or(ConfigError::MissingValue("SESSION_SECRET"))?,
            }
        } else {
            let path = lookup("SECRETS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRETS_FILE));
            Secrets::from_file(&path)?
        };

        let mut builder = Self::builder()
            .production(production)
            .session_secret(secrets.session_secret)
            .s3_credentials(secrets.aws_key, secrets.aws_secret);

        if let Some(port) = lookup("PORT") {
            builder = builder.port(parse_var("PORT", port)?);
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            builder = builder.database_url(url);
        }
        if let Some(bucket) = lookup("S3_BUCKET") {
            builder = builder.s3_bucket(bucket);
        }
        if let Some(region) = lookup("S3_REGION") {
            builder = builder.s3_region(region);
        }
        if let Some(endpoint) = lookup("S3_ENDPOINT") {
            builder = builder.s3_endpoint(endpoint);
        }
        if let Some(dir) = lookup("UPLOAD_DIR") {
            builder = builder.upload_dir(dir);
        }
        if let Some(dir) = lookup("PUBLIC_DIR") {
            builder = builder.public_dir(dir);
        }
        if let Some(path) = lookup("INDEX_HTML") {
            builder = builder.index_html(path);
        }
        if let Some(limit) = lookup("MAX_UPLOAD_BYTES") {
            builder = builder.max_upload_bytes(parse_var("MAX_UPLOAD_BYTES", limit)?);
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_var("BCRYPT_COST", cost)?);
        }

        builder.build()
    }
}

/// Builder for ServerConfig
#[derive(Debug)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self {
            config: ServerConfig {
                production: false,
                port: DEFAULT_PORT,
                database_url: None,
                session_secret: String::new(),
                session_ttl: DEFAULT_SESSION_TTL,
                s3: S3Config {
                    bucket: DEFAULT_BUCKET.to_string(),
                    region: DEFAULT_REGION.to_string(),
                    endpoint: DEFAULT_S3_ENDPOINT.to_string(),
                    access_key: String::new(),
                    secret_key: String::new(),
                },
                upload_dir: PathBuf::from("uploads"),
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
                public_dir: PathBuf::from("public"),
                index_html: PathBuf::from("index.html"),
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }
}

impl ServerConfigBuilder {
    pub fn production(mut self, production: bool) -> Self {
        self.config.production = production;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = Some(url.into());
        self
    }

    pub fn session_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.session_secret = secret.into();
        self
    }

    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.config.session_ttl = ttl;
        self
    }

    pub fn s3_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.config.s3.bucket = bucket.into();
        self
    }

    pub fn s3_region(mut self, region: impl Into<String>) -> Self {
        self.config.s3.region = region.into();
        self
    }

    pub fn s3_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.s3.endpoint = endpoint.into();
        self
    }

    pub fn s3_credentials(mut self, access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        self.config.s3.access_key = access_key.into();
        self.config.s3.secret_key = secret_key.into();
        self
    }

    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.upload_dir = dir.into();
        self
    }

    pub fn max_upload_bytes(mut self, limit: u64) -> Self {
        self.config.max_upload_bytes = limit;
        self
    }

    pub fn public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.public_dir = dir.into();
        self
    }

    pub fn index_html(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.index_html = path.into();
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let config = self.config;

        if config.session_secret.is_empty() {
            return Err(ConfigError::MissingValue("session_secret"));
        }
        if !(4..=31).contains(&config.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: config.bcrypt_cost.to_string(),
            });
        }
        if config.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MAX_UPLOAD_BYTES",
                value: "0".to_string(),
            });
        }

        Ok(config)
    }
}

/// Open the PostgreSQL pool and run the embedded migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is configured and reachable
/// - `None` if `DATABASE_URL` is not set or the connection fails
///
/// Errors are logged but do not prevent server startup.
pub async fn load_database(config: &ServerConfig) -> Option<PgPool> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Users will be kept in memory.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Users will be kept in memory.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
