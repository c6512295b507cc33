// URL validation: decides whether a submitted string is worth checking.
//
// A URL passes when it parses as an absolute http(s) URL with a host AND the
// raw string matches the canonical grammar: scheme, "://", a non-empty host
// segment, then an optional path/query/fragment. No whitespace anywhere.

use std::sync::OnceLock;

use regex_lite::Regex;
use url::Url;

use crate::safebrowsing::traits::CheckError;

/// Maximum accepted URL length, in characters.
pub const MAX_URL_LENGTH: usize = 2048;

const URL_PATTERN: &str = r"^https?://[^\s/?#]+(?:[/?#]\S*)?$";

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(URL_PATTERN).expect("URL_PATTERN is a valid regex"))
}

/// Returns `true` if `input` is a well-formed absolute http or https URL.
pub fn is_valid_url(input: &str) -> bool {
    validate_url(input).is_ok()
}

/// Validate `input` and return the parsed URL, or the reason it was rejected.
pub fn validate_url(input: &str) -> Result<Url, CheckError> {
    if input.is_empty() {
        return Err(CheckError::InvalidInput("URL is empty".to_string()));
    }
    if input.chars().count() > MAX_URL_LENGTH {
        return Err(CheckError::InvalidInput(format!(
            "URL exceeds {MAX_URL_LENGTH} characters"
        )));
    }
    // The url crate trims and percent-encodes whitespace instead of rejecting it
    if input.chars().any(char::is_whitespace) {
        return Err(CheckError::InvalidInput("URL contains whitespace".to_string()));
    }

    let parsed = Url::parse(input).map_err(|e| CheckError::InvalidInput(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(CheckError::InvalidInput(format!(
                "unsupported scheme: {other}"
            )))
        }
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(CheckError::InvalidInput("URL has no host".to_string()));
    }

    if !url_pattern().is_match(input) {
        return Err(CheckError::InvalidInput(
            "URL does not match scheme://host[/path]".to_string(),
        ));
    }

    Ok(parsed)
}
