//! Crate entrypoint wiring together configuration, the upstream client,
//! and the HTTP API.

pub mod api;
pub mod config;
pub mod error;
pub mod powerdns;
pub mod records;

use config::AppConfig;
use powerdns::client::PowerDnsClient;

use std::sync::Arc;

/// Complete application dependencies shared across handlers.
pub struct AppState {
    pub config: AppConfig,
    pub pdns: PowerDnsClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let pdns = PowerDnsClient::new(config.upstream_timeout)?;
        Ok(Self { config, pdns })
    }
}

/// Arc-wrapped version of `AppState` passed into Axum extensions.
pub type SharedState = Arc<AppState>;
