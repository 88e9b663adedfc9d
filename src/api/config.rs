//! Runtime configuration read from environment variables.

use std::env;

/// Default API port
pub const DEFAULT_PORT: u16 = 8081;

/// Default path prefix the widget routes are mounted under
pub const DEFAULT_BASE_PATH: &str = "/rest";

/// API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Port the server listens on (`PORT`)
    pub port: u16,
    /// Prefix for the widget routes (`API_BASE_PATH`), empty for the root
    pub base_path: String,
    /// PostgreSQL connection string (`DATABASE_URL`); in-memory store when unset
    pub database_url: Option<String>,
    /// Requests allowed per minute (`RATE_LIMIT_PER_MINUTE`); unlimited when unset
    pub rate_limit_per_minute: Option<u32>,
    /// Allowed CORS origins (`CORS_ALLOWED_ORIGINS`, comma separated); permissive when empty
    pub cors_allowed_origins: Vec<String>,
    /// Emit JSON log lines (`LOG_FORMAT=json`)
    pub json_logs: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            base_path: DEFAULT_BASE_PATH.to_string(),
            database_url: None,
            rate_limit_per_minute: None,
            cors_allowed_origins: Vec::new(),
            json_logs: false,
        }
    }
}

impl ApiConfig {
    /// Build the configuration from the process environment.
    ///
    /// Unset or unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let base_path = env::var("API_BASE_PATH")
            .map(|p| normalize_base_path(&p))
            .unwrap_or(defaults.base_path);

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let rate_limit_per_minute = env::var("RATE_LIMIT_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|v| *v > 0);

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let json_logs = env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self {
            port,
            base_path,
            database_url,
            rate_limit_per_minute,
            cors_allowed_origins,
            json_logs,
        }
    }
}

/// Normalize a route prefix to `/segment[/segment...]` with no trailing slash.
///
/// Blank input and `/` both mean "mount at the root" and yield an empty string.
pub fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
