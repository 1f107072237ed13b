use std::str::FromStr;
use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Longest a status request waits for its job, in milliseconds (default: `5000`).
    pub poll_timeout_ms: u64,
    /// Simulated duration of the placeholder work unit in milliseconds (default: `15000`).
    pub work_unit_delay_ms: u64,
    /// Work units allowed to run at once (default: `16`).
    pub max_workers: usize,
    /// How long a finished or failed job stays queryable, in seconds (default: `3600`).
    pub job_retention_secs: u64,
    /// Interval between retention sweeps in seconds (default: `60`).
    pub retention_sweep_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `POLL_TIMEOUT_MS`       | `5000`                     |
    /// | `WORK_UNIT_DELAY_MS`    | `15000`                    |
    /// | `MAX_WORKERS`           | `16`                       |
    /// | `JOB_RETENTION_SECS`    | `3600`                     |
    /// | `RETENTION_SWEEP_SECS`  | `60`                       |
    ///
    /// Panics on unparseable values, or if the request timeout would cut
    /// off a status request before its poll timeout elapses.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Self {
            host,
            port: env_or("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
            poll_timeout_ms: env_or("POLL_TIMEOUT_MS", 5_000),
            work_unit_delay_ms: env_or("WORK_UNIT_DELAY_MS", 15_000),
            max_workers: env_or("MAX_WORKERS", 16),
            job_retention_secs: env_or("JOB_RETENTION_SECS", 3_600),
            retention_sweep_secs: env_or("RETENTION_SWEEP_SECS", 60),
        };

        if let Err(msg) = config.validate() {
            panic!("Invalid server configuration: {msg}");
        }
        config
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), String> {
        if self.poll_timeout() >= self.request_timeout() {
            return Err(format!(
                "POLL_TIMEOUT_MS ({}) must be shorter than REQUEST_TIMEOUT_SECS ({}s)",
                self.poll_timeout_ms, self.request_timeout_secs
            ));
        }
        if self.max_workers == 0 {
            return Err("MAX_WORKERS must be at least 1".into());
        }
        if self.retention_sweep_secs == 0 {
            return Err("RETENTION_SWEEP_SECS must be at least 1".into());
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn work_unit_delay(&self) -> Duration {
        Duration::from_millis(self.work_unit_delay_ms)
    }

    pub fn retention_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.retention_sweep_secs)
    }
}

/// Read `key` from the environment, falling back to `default` when unset.
///
/// Panics if the variable is set but does not parse.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid {}: {e}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}
