use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub scratch: ScratchConfig,
    pub swagger: SwaggerConfig,
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

/// Scratch directories for uploaded imports and generated exports.
#[derive(Debug, Clone)]
pub struct ScratchConfig {
    pub upload_dir: PathBuf,
    pub export_dir: PathBuf,
    /// Files older than this are removed by the cleanup sweep
    pub retention: Duration,
    /// Minimum time between two sweeps
    pub sweep_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    /// Read every section from the process environment. `.env` is loaded by
    /// `main` before this runs.
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            scratch: ScratchConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

/// Unset or blank variables take the default; anything else must parse.
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} has an invalid value: {:?}", name, raw)),
        _ => Ok(default),
    }
}

fn text_var(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Comma separated list; blank entries are dropped.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl AppConfig {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 3000;
    /// Spreadsheet uploads are the largest bodies
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024;

    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            host: text_var("HOST", Self::DEFAULT_HOST),
            port: parse_var("PORT", Self::DEFAULT_PORT)?,
            cors_allowed_origins: split_list(&text_var("CORS_ALLOWED_ORIGINS", "*")),
            max_request_body_size: parse_var(
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
    const POOL_MAX: u32 = 10;
    const POOL_MIN: u32 = 1;
    const ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const IDLE_TIMEOUT_SECS: u64 = 10 * 60;
    const MAX_LIFETIME_SECS: u64 = 30 * 60;
    const DEFAULT_PORT: &'static str = "5432";

    /// `DATABASE_URL` wins; otherwise the URL is assembled from the
    /// `DB_USERNAME`, `DB_PASSWORD`, `DB_HOST`, `DB_PORT` and `DB_NAME` parts.
    pub fn from_env() -> Result<Self, String> {
        let url = match env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()) {
            Some(url) => url,
            None => {
                let part = |name: &str| {
                    env::var(name).map_err(|_| {
                        format!("DATABASE_URL or {} environment variable is required", name)
                    })
                };
                compose_url(
                    &part("DB_USERNAME")?,
                    &env::var("DB_PASSWORD").unwrap_or_default(),
                    &part("DB_HOST")?,
                    &text_var("DB_PORT", Self::DEFAULT_PORT),
                    &part("DB_NAME")?,
                )
            }
        };

        Ok(Self {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS", Self::POOL_MAX)?,
            min_connections: parse_var("DB_MIN_CONNECTIONS", Self::POOL_MIN)?,
            acquire_timeout_secs: parse_var("DB_ACQUIRE_TIMEOUT_SECS", Self::ACQUIRE_TIMEOUT_SECS)?,
            idle_timeout_secs: parse_var("DB_IDLE_TIMEOUT_SECS", Self::IDLE_TIMEOUT_SECS)?,
            max_lifetime_secs: parse_var("DB_MAX_LIFETIME_SECS", Self::MAX_LIFETIME_SECS)?,
        })
    }
}

/// Credentials are percent-encoded so passwords may contain `@`, `:` or `/`.
fn compose_url(username: &str, password: &str, host: &str, port: &str, database: &str) -> String {
    format!(
        "postgres://{}:{}@{}:{}/{}",
        urlencoding::encode(username),
        urlencoding::encode(password),
        host,
        port,
        database
    )
}

impl ScratchConfig {
    const DEFAULT_RETENTION_SECS: u64 = 300; // 5 minutes
    const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let upload_dir = text_var("UPLOAD_DIR", "tmp/uploads");
        let export_dir = text_var("EXPORT_DIR", "tmp/exports");
        let retention_secs = parse_var("SCRATCH_RETENTION_SECS", Self::DEFAULT_RETENTION_SECS)?;
        let sweep_interval_secs = parse_var(
            "SCRATCH_SWEEP_INTERVAL_SECS",
            Self::DEFAULT_SWEEP_INTERVAL_SECS,
        )?;

        Ok(Self {
            upload_dir: PathBuf::from(upload_dir),
            export_dir: PathBuf::from(export_dir),
            retention: Duration::from_secs(retention_secs),
            sweep_interval: Duration::from_secs(sweep_interval_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            title: text_var("SWAGGER_TITLE", "Data Referensi API"),
            version: text_var("SWAGGER_VERSION", env!("CARGO_PKG_VERSION")),
            description: text_var("SWAGGER_DESCRIPTION", "Reference data (master data) service"),
        })
    }
}
