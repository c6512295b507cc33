// POST /check (HTML form) and POST /api/check (JSON).
//
// Both routes run the same pipeline: validate the submitted string, make at
// most one outbound lookup, then present the outcome. An invalid URL never
// reaches the checker. Checker failures are logged and shown as a generic
// "check unavailable" state; no partial results are ever rendered.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;
use tracing::{info, warn};

use crate::safebrowsing::traits::{CheckError, CheckResult};
use crate::validator::validate_url;
use crate::web::render::{render, Page, CHECK_UNAVAILABLE_MESSAGE, INVALID_URL_MESSAGE};
use crate::web::{api_error, AppState};

/// The single field submitted by the form or the JSON API.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub url: String,
}

/// POST /check: render the verdict page for a form submission.
pub async fn check_form(
    State(state): State<AppState>,
    Form(request): Form<CheckRequest>,
) -> Html<String> {
    let url = request.url.trim();
    let page = match run_check(&state, url).await {
        Ok(result) => Page::verdict(url, &result),
        Err(CheckError::InvalidInput(_)) => Page::error(INVALID_URL_MESSAGE),
        Err(_) => Page::error(CHECK_UNAVAILABLE_MESSAGE),
    };
    Html(render(&page))
}

/// POST /api/check: JSON verdict.
///
/// 200 with `{url, safe, threats}`, 400 for an invalid URL,
/// 502 when the reputation service could not answer.
pub async fn check_api(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> Response {
    let url = request.url.trim();
    match run_check(&state, url).await {
        Ok(result) => Json(serde_json::json!({
            "url": url,
            "safe": result.safe(),
            "threats": result.threats(),
        }))
        .into_response(),
        Err(CheckError::InvalidInput(_)) => api_error(StatusCode::BAD_REQUEST, INVALID_URL_MESSAGE),
        Err(_) => api_error(StatusCode::BAD_GATEWAY, CHECK_UNAVAILABLE_MESSAGE),
    }
}

async fn run_check(state: &AppState, url: &str) -> Result<CheckResult, CheckError> {
    if let Err(e) = validate_url(url) {
        info!(error = %e, "Rejected submitted URL");
        return Err(e);
    }

    let result = state.checker.check(url, state.check_timeout).await;
    match &result {
        Ok(verdict) => info!(
            url = url,
            safe = verdict.safe(),
            threat_count = verdict.threats().len(),
            "URL checked"
        ),
        Err(e) => warn!(url = url, error = %e, "Threat check failed"),
    }
    result
}
