//! Runtime configuration loaded from the environment.
//!
//! Values come from process environment variables, optionally seeded from a
//! `.env` file in the working directory and from `~/.buying_assistant.env`.

use crate::client::DEFAULT_BASE_URL;
use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Holds all configuration loaded at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Root URL of the assistant backend
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// `tracing` filter directive, e.g. `warn` or `buying_assistant=debug`
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load env files, then read configuration from the environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        if let Some(path) = user_env_file() {
            if path.exists() {
                dotenv::from_path(&path).ok();
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let base_url = lookup("ASSISTANT_BASE_URL").unwrap_or(defaults.base_url);
        url::Url::parse(&base_url).map_err(|e| {
            Error::Config(format!("ASSISTANT_BASE_URL '{}' is not a URL: {}", base_url, e))
        })?;

        let timeout = match lookup("ASSISTANT_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(Error::Config(format!(
                        "ASSISTANT_TIMEOUT_SECS '{}' is not a positive number of seconds",
                        raw
                    )))
                }
            },
            None => defaults.timeout,
        };

        let log_filter = lookup("RUST_LOG").unwrap_or(defaults.log_filter);

        Ok(Self {
            base_url,
            timeout,
            log_filter,
        })
    }
}

fn user_env_file() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".buying_assistant.env"))
}
