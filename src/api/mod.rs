pub mod proxy;
pub mod zones;

use axum::{
    Extension, Json, Router,
    routing::{any, delete, get},
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::SharedState;
use crate::error::AppError;

/// Version string reported to the UI shell.
pub const UI_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/config", get(app_config))
        // bare prefix still gets the method gate before the 404
        .route("/api/pdns", any(proxy::forward))
        .route("/api/pdns/{*path}", any(proxy::forward))
        .route("/api/zones", delete(zones::delete_zones))
        .route(
            "/api/zones/{zone}/records",
            get(zones::list_records)
                .put(zones::save_record)
                .delete(zones::delete_records),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}

#[derive(Serialize)]
struct ConfigResponse {
    server_id: String,
    ui_version: &'static str,
}

/// The parts of server configuration the UI shell needs. The credential
/// never leaves the process.
async fn app_config(Extension(state): Extension<SharedState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        server_id: state.config.upstream.server_id.clone(),
        ui_version: UI_VERSION,
    })
}

async fn not_found() -> AppError {
    AppError::NotFound
}
