//! The authenticated forwarding endpoint: relays `/api/pdns/*` to the
//! PowerDNS API so the credential never reaches the browser.

use axum::{
    Extension, Json,
    body::to_bytes,
    extract::Request,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::SharedState;
use crate::error::AppError;
use crate::powerdns::client::classify_transport_error;

/// Prefix stripped from the inbound path before forwarding.
const ROUTE_PREFIX: &str = "/api/pdns";

pub async fn forward(
    Extension(state): Extension<SharedState>,
    req: Request,
) -> Result<Response, AppError> {
    let Some(method) = upstream_method(req.method()) else {
        return Err(AppError::MethodNotAllowed);
    };

    // Work from the raw request path so percent-encoded segments reach
    // the upstream unchanged.
    let path = req
        .uri()
        .path()
        .strip_prefix(ROUTE_PREFIX)
        .unwrap_or_default()
        .trim_start_matches('/')
        .to_string();
    if path.is_empty() {
        return Err(AppError::NotFound);
    }
    let query = req.uri().query().map(str::to_owned);

    let body = to_bytes(req.into_body(), usize::MAX)
        .await
        .map_err(|_| AppError::BadRequest("failed to read request body".into()))?;

    // Read per request so a changed upstream takes effect immediately.
    let cfg = &state.config.upstream;
    let upstream = state
        .pdns
        .forward(cfg, method, &path, query.as_deref(), body)
        .await?;

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    if status == StatusCode::NO_CONTENT {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let is_json = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().contains("application/json"));

    let body = upstream
        .bytes()
        .await
        .map_err(|err| classify_transport_error(err, &cfg.base_url))?;

    if is_json {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&body) {
            return Ok((status, Json(value)).into_response());
        }
    }

    // Non-JSON upstream bodies (e.g. a zone export) still reach the
    // client as valid JSON.
    Ok((
        status,
        Json(serde_json::json!({ "result": String::from_utf8_lossy(&body) })),
    )
        .into_response())
}

fn upstream_method(method: &Method) -> Option<reqwest::Method> {
    match method.as_str() {
        "GET" => Some(reqwest::Method::GET),
        "POST" => Some(reqwest::Method::POST),
        "PUT" => Some(reqwest::Method::PUT),
        "PATCH" => Some(reqwest::Method::PATCH),
        "DELETE" => Some(reqwest::Method::DELETE),
        _ => None,
    }
}
