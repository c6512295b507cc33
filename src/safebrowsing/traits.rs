// Threat checker trait, the swap-ready abstraction.
//
// The web handlers and the CLI only ever talk to `dyn ThreatChecker`.
// SafeBrowsingClient is the production implementation; tests plug in
// canned checkers without any network access.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

/// The verdict for a single URL.
///
/// `safe` is always derived from `threats`, so a result can never claim to
/// be safe while carrying threat labels (or vice versa).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    safe: bool,
    threats: Vec<String>,
}

impl CheckResult {
    /// Build a result from the threat labels reported by the service,
    /// in the order the service returned them.
    pub fn from_threats(threats: Vec<String>) -> Self {
        Self {
            safe: threats.is_empty(),
            threats,
        }
    }

    /// A result with no matches.
    pub fn clean() -> Self {
        Self::from_threats(Vec::new())
    }

    pub fn safe(&self) -> bool {
        self.safe
    }

    pub fn threats(&self) -> &[String] {
        &self.threats
    }
}

/// Everything that can go wrong between receiving a URL and producing a verdict.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("invalid URL: {0}")]
    InvalidInput(String),
    #[error("failed to build threat check request: {0}")]
    RequestConstructionFailed(String),
    #[error("threat check request failed: {0}")]
    NetworkFailure(String),
    #[error("failed to decode threat check response: {0}")]
    DecodeFailure(String),
}

/// Trait for checking a URL against a threat-intelligence source.
/// Implementations must be async because the real provider is an HTTP API.
#[async_trait]
pub trait ThreatChecker: Send + Sync {
    /// Check a single, already validated URL. `timeout` bounds the whole
    /// outbound call; there are no retries.
    async fn check(&self, url: &str, timeout: Duration) -> Result<CheckResult, CheckError>;
}
