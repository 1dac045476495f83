use crate::browser::RetryPolicy;
use crate::http::var;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} not found")]
    Missing(&'static str),

    #[error("invalid {key} format \"{value}\" - {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything read from the environment (or `.env`) for a run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base directory for persisted records.
    pub output_dir: PathBuf,
    pub api_key: String,
    /// JSON list of `{ "Symbol": ... }` records, used when no symbols are given.
    pub symbols_path: PathBuf,
    pub api_url: String,
    pub yahoo_url: String,
    pub insider_url: String,
    pub retry: RetryPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            output_dir: required("FUNDUMP_DIR")?.into(),
            api_key: required("FUNDUMP_API_KEY")?,
            symbols_path: optional("FUNDUMP_SYMBOLS", "./symbols.json").into(),
            api_url: optional("FUNDUMP_API_URL", "https://eodhd.com/api/fundamentals"),
            yahoo_url: optional("FUNDUMP_YAHOO_URL", "https://finance.yahoo.com"),
            insider_url: optional("FUNDUMP_INSIDER_URL", "http://openinsider.com/screener"),
            retry: RetryPolicy {
                attempts: parsed("NAVIGATION_ATTEMPTS", 4)?,
                idle_timeout: Duration::from_secs(parsed("NETWORK_IDLE_TIMEOUT", 30)?),
                backoff: Duration::from_millis(parsed("NAVIGATION_BACKOFF_MS", 0)?),
            },
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    var(key).map_err(|_| ConfigError::Missing(key))
}

fn optional(key: &'static str, default: &str) -> String {
    var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Ok(value) = var(key) else {
        return Ok(default);
    };
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|err| ConfigError::Invalid {
        key,
        reason: err.to_string(),
        value,
    })
}
