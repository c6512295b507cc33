// Google Safe Browsing v4 implementation of ThreatChecker.
//
// One POST to threatMatches:find per check. The service answers `{}` for a
// clean URL and `{"matches": [...]}` when the URL is on one of the requested
// threat lists.
//
// API docs: https://developers.google.com/safe-browsing/v4/lookup-api

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{CheckError, CheckResult, ThreatChecker};

/// Default Safe Browsing lookup endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://safebrowsing.googleapis.com/v4/threatMatches:find";

/// Threat lists every lookup is matched against.
pub const THREAT_TYPES: [&str; 2] = ["MALWARE", "SOCIAL_ENGINEERING"];

/// Safe Browsing lookup client.
pub struct SafeBrowsingClient {
    client: Client,
    endpoint: String,
    api_key: String,
    client_id: String,
}

impl SafeBrowsingClient {
    /// Create a client against the public Google endpoint.
    pub fn new(api_key: &str, client_id: &str) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key, client_id)
    }

    /// Create a client against a custom endpoint (proxies, local mocks).
    pub fn with_endpoint(endpoint: &str, api_key: &str, client_id: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            client_id: client_id.to_string(),
        }
    }

    /// Build the JSON body naming `url` as the single threat entry.
    pub fn request_body(&self, url: &str) -> FindThreatMatchesRequest {
        FindThreatMatchesRequest {
            client: ClientInfo {
                client_id: self.client_id.clone(),
                client_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            threat_info: ThreatInfo {
                threat_types: THREAT_TYPES.iter().map(|t| t.to_string()).collect(),
                platform_types: vec!["ANY_PLATFORM".to_string()],
                threat_entry_types: vec!["URL".to_string()],
                threat_entries: vec![ThreatEntry {
                    url: url.to_string(),
                }],
            },
        }
    }

    fn endpoint_with_key(&self) -> Result<reqwest::Url, CheckError> {
        let mut endpoint = reqwest::Url::parse(&self.endpoint).map_err(|e| {
            CheckError::RequestConstructionFailed(format!("bad endpoint {}: {e}", self.endpoint))
        })?;
        endpoint.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(endpoint)
    }
}

#[async_trait]
impl ThreatChecker for SafeBrowsingClient {
    async fn check(&self, url: &str, timeout: Duration) -> Result<CheckResult, CheckError> {
        let request = self
            .client
            .post(self.endpoint_with_key()?)
            .timeout(timeout)
            .json(&self.request_body(url))
            .build()
            // reqwest errors embed the request URL, which carries the API key
            .map_err(|e| CheckError::RequestConstructionFailed(e.without_url().to_string()))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| CheckError::NetworkFailure(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(CheckError::NetworkFailure(format!(
                "Safe Browsing API returned {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CheckError::NetworkFailure(e.without_url().to_string()))?;

        let result = parse_response(&body)?;

        debug!(
            url = url,
            safe = result.safe(),
            threats = ?result.threats(),
            "Checked URL"
        );

        Ok(result)
    }
}

/// Decode a threatMatches:find response body into a verdict.
pub fn parse_response(body: &[u8]) -> Result<CheckResult, CheckError> {
    let parsed: FindThreatMatchesResponse =
        serde_json::from_slice(body).map_err(|e| CheckError::DecodeFailure(e.to_string()))?;

    Ok(CheckResult::from_threats(
        parsed.matches.into_iter().map(|m| m.threat_type).collect(),
    ))
}

// --- Safe Browsing request/response types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindThreatMatchesRequest {
    pub client: ClientInfo,
    pub threat_info: ThreatInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_id: String,
    pub client_version: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatInfo {
    pub threat_types: Vec<String>,
    pub platform_types: Vec<String>,
    pub threat_entry_types: Vec<String>,
    pub threat_entries: Vec<ThreatEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatEntry {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct FindThreatMatchesResponse {
    /// Absent when nothing matched.
    #[serde(default)]
    pub matches: Vec<ThreatMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatMatch {
    pub threat_type: String,
    pub platform_type: Option<String>,
    pub threat_entry_type: Option<String>,
    pub threat: Option<ThreatEntry>,
    pub cache_duration: Option<String>,
}
