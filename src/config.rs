//! Application configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_STORE_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_STORE_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TOAST_HISTORY: usize = 20;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    Missing { var: String },
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestConfig {
    pub base_url: String,
    pub api_key: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String, max_connections: u32 },
    Rest(RestConfig),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub store: StoreBackend,
    pub static_dir: PathBuf,
    pub toast_history: usize,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `STORE_BACKEND`: `postgres` (default), `rest`, or `memory`
    /// - `STATIC_DIR`: browser assets, default `<crate>/static`
    /// - `TOAST_HISTORY`: notifications kept for the browser, default 20
    ///
    /// Backend specific:
    /// - postgres: `DATABASE_URL` (required), `DB_MAX_CONNECTIONS` (default 5)
    /// - rest: `STORE_REST_URL` and `STORE_REST_KEY_ENV` (required; names the
    ///   env var holding the API key), `STORE_REQUEST_TIMEOUT_SECS` (30),
    ///   `STORE_CONNECT_TIMEOUT_SECS` (10)
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
            Err(_) => DEFAULT_PORT,
        };
        let store = parse_backend(std::env::var("STORE_BACKEND").ok().as_deref())?;
        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"));
        let toast_history = env_parse("TOAST_HISTORY", DEFAULT_TOAST_HISTORY);

        Ok(Self { port, store, static_dir, toast_history })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn required(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::Missing { var: var.to_owned() })
}

fn parse_backend(raw: Option<&str>) -> Result<StoreBackend, ConfigError> {
    match raw.unwrap_or("postgres") {
        "postgres" => Ok(StoreBackend::Postgres {
            database_url: required("DATABASE_URL")?,
            max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
        }),
        "rest" => {
            let base_url = required("STORE_REST_URL")?;
            let key_var = required("STORE_REST_KEY_ENV")?;
            let api_key = required(&key_var)?;
            Ok(StoreBackend::Rest(RestConfig {
                base_url: base_url.trim_end_matches('/').to_owned(),
                api_key,
                request_timeout_secs: env_parse("STORE_REQUEST_TIMEOUT_SECS", DEFAULT_STORE_REQUEST_TIMEOUT_SECS),
                connect_timeout_secs: env_parse("STORE_CONNECT_TIMEOUT_SECS", DEFAULT_STORE_CONNECT_TIMEOUT_SECS),
            }))
        }
        "memory" => Ok(StoreBackend::Memory),
        other => Err(ConfigError::Invalid { var: "STORE_BACKEND", value: other.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
