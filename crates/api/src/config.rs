use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use movies_db::StoreConfig;

/// A configuration value could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{key} has invalid value '{value}': {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Document store connection settings.
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `HOST`                      | `0.0.0.0`               |
    /// | `PORT`                      | `8000`                  |
    /// | `CORS_ORIGINS`              | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`     | `30`                    |
    /// | `ELASTIC_SCHEMA`            | `http://`               |
    /// | `ELASTIC_HOST`              | `127.0.0.1`             |
    /// | `ELASTIC_PORT`              | `9200`                  |
    /// | `ELASTIC_MAXSIZE`           | `5`                     |
    /// | `ELASTIC_TIMEOUT`           | `10` (seconds)          |
    /// | `ELASTIC_RETRIES`           | `3`                     |
    /// | `ELASTIC_MAX_RESULT_WINDOW` | `10000`                 |
    /// | `TITLES_INDEX`              | `movies`                |
    /// | `CATEGORIES_INDEX`          | `genres`                |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let cors_origins = env
            .string("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let store_url = format!(
            "{}{}:{}",
            env.string("ELASTIC_SCHEMA", "http://"),
            env.string("ELASTIC_HOST", "127.0.0.1"),
            env.parse::<u16>("ELASTIC_PORT", 9200)?,
        );

        let store = StoreConfig {
            url: store_url,
            max_connections: env.parse("ELASTIC_MAXSIZE", 5)?,
            timeout: Duration::from_secs(env.parse("ELASTIC_TIMEOUT", 10)?),
            max_retries: env.parse("ELASTIC_RETRIES", 3)?,
            max_result_window: env.parse("ELASTIC_MAX_RESULT_WINDOW", 10_000)?,
            titles_index: env.string("TITLES_INDEX", "movies"),
            categories_index: env.string("CATEGORIES_INDEX", "genres"),
        };

        Ok(Self {
            host: env.string("HOST", "0.0.0.0"),
            port: env.parse("PORT", 8000)?,
            cors_origins,
            request_timeout_secs: env.parse("REQUEST_TIMEOUT_SECS", 30)?,
            shutdown_timeout_secs: env.parse("SHUTDOWN_TIMEOUT_SECS", 30)?,
            store,
        })
    }
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn string(&self, key: &str, default: &str) -> String {
        (self.0)(key).unwrap_or_else(|| default.to_string())
    }

    fn parse<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match (self.0)(key) {
            None => Ok(default),
            Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError {
                key,
                reason: e.to_string(),
                value,
            }),
        }
    }
}
