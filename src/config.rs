use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::safebrowsing::client::DEFAULT_ENDPOINT;

/// Client identifier sent to Safe Browsing when GOOGLE_CLIENT_ID is unset.
pub const DEFAULT_CLIENT_ID: &str = "securelink-app";

/// Listen port when PORT is unset.
pub const DEFAULT_PORT: u16 = 8080;

/// Outbound check timeout when SECURELINK_CHECK_TIMEOUT_SECS is unset.
pub const DEFAULT_CHECK_TIMEOUT_SECS: u64 = 10;

/// Central configuration loaded from environment variables.
///
/// The API key comes from the environment only (never hardcoded). A .env
/// file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Safe Browsing API key (GOOGLE_API_KEY). Required to check anything.
    pub google_api_key: String,
    /// Client identifier reported to Safe Browsing (GOOGLE_CLIENT_ID).
    pub google_client_id: String,
    /// Safe Browsing lookup endpoint (SAFE_BROWSING_URL).
    pub safe_browsing_url: String,
    /// Port the web server listens on (PORT).
    pub port: u16,
    /// Upper bound on a single outbound check.
    pub check_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything except the API key has a default; call `require_api_key`
    /// before serving or checking.
    pub fn load() -> Result<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    /// Empty values are treated the same as unset ones.
    pub fn load_from<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match var("SECURELINK_CHECK_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().with_context(|| {
                format!("SECURELINK_CHECK_TIMEOUT_SECS must be whole seconds, got {raw:?}")
            })?,
            None => DEFAULT_CHECK_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            anyhow::bail!(
                "SECURELINK_CHECK_TIMEOUT_SECS must be at least 1 second.\n\
                 Unset it to use the default of {DEFAULT_CHECK_TIMEOUT_SECS}."
            );
        }

        Ok(Self {
            google_api_key: var("GOOGLE_API_KEY").unwrap_or_default(),
            google_client_id: var("GOOGLE_CLIENT_ID")
                .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
            safe_browsing_url: var("SAFE_BROWSING_URL")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            port,
            check_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Check that the Safe Browsing API key is configured.
    /// The process must not serve or check URLs without it.
    pub fn require_api_key(&self) -> Result<()> {
        if self.google_api_key.is_empty() {
            anyhow::bail!(
                "GOOGLE_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}
