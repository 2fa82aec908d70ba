//! Provider configuration.

use anyhow::{Context, Result};
use statuscake_client::client::DEFAULT_BASE_URL;
use statuscake_client::StatusCakeClientConfig;
use std::fmt;
use std::time::Duration;

const USERNAME_VAR: &str = "STATUSCAKE_USERNAME";
const API_KEY_VAR: &str = "STATUSCAKE_APIKEY";
const API_URL_VAR: &str = "STATUSCAKE_API_URL";
const TIMEOUT_VAR: &str = "STATUSCAKE_TIMEOUT_SECS";

/// StatusCake account and endpoint settings.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Account user name
    pub username: String,
    /// Account API key
    pub api_key: String,
    /// API root
    pub api_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ProviderConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `STATUSCAKE_USERNAME`: account user name (required)
    /// - `STATUSCAKE_APIKEY`: account API key (required)
    /// - `STATUSCAKE_API_URL`: API root, defaults to the public endpoint
    /// - `STATUSCAKE_TIMEOUT_SECS`: request timeout in seconds, defaults to 30
    ///
    /// # Errors
    ///
    /// Returns error if a required variable is missing or a value is invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns error if a required variable is missing or a value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = StatusCakeClientConfig::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let username =
            non_empty(USERNAME_VAR).with_context(|| format!("{USERNAME_VAR} is not set"))?;
        let api_key =
            non_empty(API_KEY_VAR).with_context(|| format!("{API_KEY_VAR} is not set"))?;
        let api_url = non_empty(API_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match non_empty(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {TIMEOUT_VAR}: {raw}"))?;
                anyhow::ensure!(secs > 0, "{TIMEOUT_VAR} must be at least 1 second");
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        Ok(Self {
            username,
            api_key,
            api_url,
            timeout,
        })
    }

    /// Client settings for these credentials.
    #[must_use]
    pub fn to_client_config(&self) -> StatusCakeClientConfig {
        StatusCakeClientConfig {
            base_url: self.api_url.clone(),
            username: self.username.clone(),
            api_key: self.api_key.clone(),
            timeout: self.timeout,
        }
    }
}
