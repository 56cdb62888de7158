use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL connection string. `None` leaves every storage-backed
    /// endpoint failing with a configuration error.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections (default: `5`).
    pub db_max_connections: u32,
    /// Facility-count API endpoint.
    pub upstream_url: String,
    /// Timeout for a single upstream fetch in seconds (default: `10`).
    pub upstream_timeout_secs: u64,
    /// When set, a background task records a snapshot every N seconds.
    pub log_interval_secs: Option<u64>,
    /// When set, files under this directory are served for unmatched paths.
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `5000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `DATABASE_URL`          | unset                      |
    /// | `DB_MAX_CONNECTIONS`    | `5`                        |
    /// | `UPSTREAM_URL`          | public facility-count API  |
    /// | `UPSTREAM_TIMEOUT_SECS` | `10`                       |
    /// | `LOG_INTERVAL_SECS`     | unset (no background task) |
    /// | `STATIC_DIR`            | unset                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = non_empty_var("DATABASE_URL");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let upstream_url = non_empty_var("UPSTREAM_URL")
            .unwrap_or_else(|| recwatch_upstream::client::DEFAULT_URL.to_string());

        let upstream_timeout_secs: u64 = non_empty_var("UPSTREAM_TIMEOUT_SECS")
            .map(|v| v.parse().expect("UPSTREAM_TIMEOUT_SECS must be a valid u64"))
            .unwrap_or(recwatch_upstream::client::DEFAULT_TIMEOUT.as_secs());

        let log_interval_secs = non_empty_var("LOG_INTERVAL_SECS").map(|v| {
            v.parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .expect("LOG_INTERVAL_SECS must be a positive u64")
        });

        let static_dir = non_empty_var("STATIC_DIR").map(PathBuf::from);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            db_max_connections,
            upstream_url,
            upstream_timeout_secs,
            log_interval_secs,
            static_dir,
        }
    }
}

/// Read an env var, treating an empty or whitespace-only value as unset.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
