// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::records::ValidationError;

/// Single-field envelope used for every synthesized error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponseBody {
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    /// Rendered with an empty body, unlike the other variants.
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("not found")]
    NotFound,

    #[error("PowerDNS API request timed out")]
    GatewayTimeout,

    #[error("{0}")]
    ServiceUnavailable(String),

    /// Upstream answered with its own HTTP error; relayed at its status.
    #[error("{detail}")]
    Upstream { status: StatusCode, detail: String },

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream { status, .. } => *status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the operator; also what bulk summaries report
    /// per failed unit.
    pub fn detail_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::MethodNotAllowed = self {
            return StatusCode::METHOD_NOT_ALLOWED.into_response();
        }
        let status = self.status();
        let body = Json(ErrorResponseBody {
            detail: self.detail_message(),
        });
        (status, body).into_response()
    }
}

/// Pick the most specific human-readable message out of an upstream
/// error body: PowerDNS reports `error`, some endpoints `message`, and
/// wrapped non-JSON bodies land in `result`.
pub fn extract_upstream_detail(status: StatusCode, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        for field in ["error", "message", "result"] {
            if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    let raw = String::from_utf8_lossy(body);
    let raw = raw.trim();
    if raw.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("upstream error")
            .to_string()
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_detail_prefers_the_error_field() {
        let body = br#"{"error": "Could not find domain", "result": "ignored"}"#;
        assert_eq!(
            extract_upstream_detail(StatusCode::NOT_FOUND, body),
            "Could not find domain"
        );
    }

    #[test]
    fn upstream_detail_falls_back_through_fields() {
        let body = br#"{"message": "backend unavailable"}"#;
        assert_eq!(
            extract_upstream_detail(StatusCode::INTERNAL_SERVER_ERROR, body),
            "backend unavailable"
        );
    }

    #[test]
    fn upstream_detail_uses_raw_text_for_non_json() {
        assert_eq!(
            extract_upstream_detail(StatusCode::BAD_GATEWAY, b"  upstream exploded \n"),
            "upstream exploded"
        );
    }

    #[test]
    fn upstream_detail_uses_the_status_reason_for_empty_bodies() {
        assert_eq!(
            extract_upstream_detail(StatusCode::NOT_FOUND, b""),
            "Not Found"
        );
    }
}
