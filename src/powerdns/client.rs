//! HTTP core for the upstream PowerDNS API: request assembly, credential
//! injection, transport-failure classification, and the small typed
//! surface used by the zone editing endpoints.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use tracing::{error, info};

use crate::config::UpstreamConfig;
use crate::error::{AppError, extract_upstream_detail};
use crate::powerdns::types::{PdnsRrset, PdnsZone};

/// Shared HTTP client for the upstream API. The connection pool and the
/// request timeout live here; the base URL and credential are taken from
/// the configuration on every call.
#[derive(Clone)]
pub struct PowerDnsClient {
    http: Client,
}

impl PowerDnsClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
        })
    }

    /// Relay one request to `{base}/api/v1/{path}`, attaching the
    /// credential and accept headers. `Content-Type` is set only when a
    /// body is present. Transport failures come back already classified;
    /// upstream HTTP errors are returned as-is for the caller to pass
    /// through or unwrap.
    pub async fn forward(
        &self,
        cfg: &UpstreamConfig,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let mut url = format!("{}/api/v1/{}", cfg.base_url, path);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }

        info!("{method} {url}");

        let mut req = self
            .http
            .request(method, &url)
            .header("X-API-Key", &cfg.api_key)
            .header(ACCEPT, "application/json");
        if !body.is_empty() {
            req = req.header(CONTENT_TYPE, "application/json").body(body);
        }

        req.send()
            .await
            .map_err(|err| classify_transport_error(err, &cfg.base_url))
    }

    fn zone_path(cfg: &UpstreamConfig, zone: &str) -> String {
        format!("servers/{}/zones/{}", cfg.server_id, zone)
    }

    pub async fn get_zone(&self, cfg: &UpstreamConfig, zone: &str) -> Result<PdnsZone, AppError> {
        let resp = self
            .forward(
                cfg,
                Method::GET,
                &Self::zone_path(cfg, zone),
                None,
                Bytes::new(),
            )
            .await?;
        let resp = expect_success(resp).await?;
        resp.json::<PdnsZone>()
            .await
            .map_err(|err| AppError::Internal(err.to_string()))
    }

    pub async fn patch_rrsets(
        &self,
        cfg: &UpstreamConfig,
        zone: &str,
        rrsets: &[PdnsRrset],
    ) -> Result<(), AppError> {
        #[derive(Serialize)]
        struct PatchBody<'a> {
            rrsets: &'a [PdnsRrset],
        }

        let body = serde_json::to_vec(&PatchBody { rrsets })
            .map_err(|err| AppError::Internal(err.to_string()))?;
        let resp = self
            .forward(
                cfg,
                Method::PATCH,
                &Self::zone_path(cfg, zone),
                None,
                Bytes::from(body),
            )
            .await?;
        expect_success(resp).await.map(|_| ())
    }

    pub async fn delete_zone(&self, cfg: &UpstreamConfig, zone: &str) -> Result<(), AppError> {
        let resp = self
            .forward(
                cfg,
                Method::DELETE,
                &Self::zone_path(cfg, zone),
                None,
                Bytes::new(),
            )
            .await?;
        expect_success(resp).await.map(|_| ())
    }
}

/// Map a failed upstream round trip onto the client-facing status. The
/// three cases ask for different operator responses: a timeout points at
/// a slow or overloaded upstream, a refused connection at
/// misconfiguration, anything else at a condition worth a server-side
/// log line.
pub(crate) fn classify_transport_error(err: reqwest::Error, base_url: &str) -> AppError {
    if err.is_timeout() {
        return AppError::GatewayTimeout;
    }
    if err.is_connect() {
        return AppError::ServiceUnavailable(format!(
            "cannot connect to PowerDNS API at {base_url}: {err}"
        ));
    }
    error!("unexpected upstream transport error: {err}");
    AppError::Internal(err.to_string())
}

/// Turn an upstream HTTP error status into the relayed error form.
async fn expect_success(resp: Response) -> Result<Response, AppError> {
    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.bytes().await.unwrap_or_default();
    Err(AppError::Upstream {
        status,
        detail: extract_upstream_detail(status, &body),
    })
}
