//! Shared harness: stub PowerDNS upstreams plus a console router wired
//! to them.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::response::Response;
use http_body_util::BodyExt;
use tokio::net::TcpListener;
use zoneboard::{
    AppState, api,
    config::{AppConfig, UpstreamConfig},
};

pub fn test_config(base_url: &str, timeout: Duration) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        upstream: UpstreamConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: "test-key".into(),
            server_id: "localhost".into(),
        },
        upstream_timeout: timeout,
    }
}

/// Console router pointed at `base_url` with a generous timeout.
pub fn test_router(base_url: &str) -> Router {
    router_with_timeout(base_url, Duration::from_secs(5))
}

pub fn router_with_timeout(base_url: &str, timeout: Duration) -> Router {
    let state = Arc::new(
        AppState::new(test_config(base_url, timeout)).expect("upstream client should build"),
    );
    api::create_router(state)
}

/// Serve `app` as the stub upstream on an ephemeral loopback port and
/// return its base URL.
pub async fn spawn_upstream(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub upstream");
    let addr = listener.local_addr().expect("stub upstream addr");
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.ok();
    });
    format!("http://{addr}")
}

/// A loopback URL with nothing listening behind it.
pub async fn refused_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}")
}

pub async fn body_bytes(resp: Response) -> Vec<u8> {
    resp.into_body()
        .collect()
        .await
        .expect("read response body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(resp).await).expect("response body should be JSON")
}
