use std::path::PathBuf;

use cafe_core::types::Timestamp;
use chrono::{DateTime, Duration, Utc};

use crate::auth::jwt::JwtConfig;

/// Default event start: 21 November 2026, 09:00 Colombo time.
const DEFAULT_EVENT_STARTS_AT: &str = "2026-11-21T09:00:00+05:30";
/// Default event length when `EVENT_ENDS_AT` is unset.
const DEFAULT_EVENT_HOURS: i64 = 8;
/// Default upload cap: 10 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Where documents are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// JSON files under `DATA_DIR`.
    Local,
    /// Process memory; everything is lost on restart.
    Memory,
}

impl StorageBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" | "file" | "files" => Some(Self::Local),
            "memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Public event details shown on the landing page.
#[derive(Debug, Clone)]
pub struct EventConfig {
    pub name: String,
    pub venue: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

/// Argon2id PHC hashes for the shared staff logins. A missing hash disables
/// that role's login.
#[derive(Debug, Clone, Default)]
pub struct StaffCredentials {
    pub admin_password_hash: Option<String>,
    pub kitchen_password_hash: Option<String>,
}

/// External image host used by `POST /uploads`.
#[derive(Debug, Clone)]
pub struct ImageHostConfig {
    pub upload_url: String,
    pub api_key: Option<String>,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub storage_backend: StorageBackend,
    /// Root directory for the local backend (default: `./data`).
    pub data_dir: PathBuf,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    pub staff: StaffCredentials,
    pub event: EventConfig,
    /// Optional JSON menu replacing the built-in one.
    pub menu_path: Option<PathBuf>,
    /// `None` disables uploads.
    pub image_host: Option<ImageHostConfig>,
    pub max_upload_bytes: usize,
    /// Mark like-tracking cookies `Secure`.
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                       |
    /// |--------------------------|-------------------------------|
    /// | `HOST`                   | `0.0.0.0`                     |
    /// | `PORT`                   | `3000`                        |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`       |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                          |
    /// | `STORAGE_BACKEND`        | `local`                       |
    /// | `DATA_DIR`               | `./data`                      |
    /// | `ADMIN_PASSWORD_HASH`    | unset (admin login disabled)  |
    /// | `KITCHEN_PASSWORD_HASH`  | unset (kitchen login disabled)|
    /// | `EVENT_NAME`             | `Cafe Cursor Colombo`         |
    /// | `EVENT_VENUE`            | `Colombo, Sri Lanka`          |
    /// | `EVENT_STARTS_AT`        | `2026-11-21T09:00:00+05:30`   |
    /// | `EVENT_ENDS_AT`          | start + 8 hours               |
    /// | `MENU_PATH`              | unset (built-in menu)         |
    /// | `IMAGE_HOST_UPLOAD_URL`  | unset (uploads disabled)      |
    /// | `IMAGE_HOST_API_KEY`     | unset                         |
    /// | `MAX_UPLOAD_BYTES`       | `10485760`                    |
    /// | `COOKIE_SECURE`          | `false`                       |
    ///
    /// JWT settings are documented on [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on malformed values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let storage_backend = StorageBackend::parse(&env_or("STORAGE_BACKEND", "local"))
            .expect("STORAGE_BACKEND must be 'local' or 'memory'");

        let data_dir = PathBuf::from(env_or("DATA_DIR", "./data"));

        let staff = StaffCredentials {
            admin_password_hash: optional_env("ADMIN_PASSWORD_HASH"),
            kitchen_password_hash: optional_env("KITCHEN_PASSWORD_HASH"),
        };

        let starts_at = parse_timestamp(
            "EVENT_STARTS_AT",
            &env_or("EVENT_STARTS_AT", DEFAULT_EVENT_STARTS_AT),
        );
        let ends_at = optional_env("EVENT_ENDS_AT")
            .map(|raw| parse_timestamp("EVENT_ENDS_AT", &raw))
            .unwrap_or_else(|| starts_at + Duration::hours(DEFAULT_EVENT_HOURS));
        assert!(ends_at > starts_at, "EVENT_ENDS_AT must be after EVENT_STARTS_AT");

        let event = EventConfig {
            name: env_or("EVENT_NAME", "Cafe Cursor Colombo"),
            venue: env_or("EVENT_VENUE", "Colombo, Sri Lanka"),
            starts_at,
            ends_at,
        };

        let image_host = optional_env("IMAGE_HOST_UPLOAD_URL").map(|upload_url| ImageHostConfig {
            upload_url,
            api_key: optional_env("IMAGE_HOST_API_KEY"),
        });

        let max_upload_bytes: usize = env_or("MAX_UPLOAD_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let cookie_secure: bool = env_or("COOKIE_SECURE", "false")
            .parse()
            .expect("COOKIE_SECURE must be 'true' or 'false'");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage_backend,
            data_dir,
            jwt: JwtConfig::from_env(),
            staff,
            event,
            menu_path: optional_env("MENU_PATH").map(PathBuf::from),
            image_host,
            max_upload_bytes,
            cookie_secure,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// An env var that is set and non-blank.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_timestamp(key: &str, raw: &str) -> Timestamp {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| panic!("{key} must be an RFC 3339 timestamp ('{raw}'): {e}"))
}
