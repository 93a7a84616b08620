//! Process configuration: command-line flags with environment fallbacks.

use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
pub struct Cli {
    /// Listen host for the HTTP server
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// Listen port for the HTTP server
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
    /// PowerDNS API base URL
    #[arg(long, env = "PDNS_API_URL", default_value = "http://localhost:8081")]
    pub pdns_api_url: String,
    /// PowerDNS API key
    #[arg(
        long,
        env = "PDNS_API_KEY",
        default_value = "changeme",
        hide_env_values = true
    )]
    pub pdns_api_key: String,
    /// PowerDNS server ID
    #[arg(long, env = "PDNS_SERVER_ID", default_value = "localhost")]
    pub pdns_server_id: String,
    /// Upstream request timeout in seconds
    #[arg(long, env = "PDNS_TIMEOUT", default_value_t = 30)]
    pub pdns_timeout: u64,
}

/// Where and how to reach the PowerDNS API. Handlers read this from the
/// application state on every forwarded request rather than capturing it
/// at router construction.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL without the `/api/v1` suffix or a trailing slash.
    pub base_url: String,
    pub api_key: String,
    pub server_id: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub upstream: UpstreamConfig,
    pub upstream_timeout: Duration,
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            upstream: UpstreamConfig {
                base_url: cli.pdns_api_url.trim_end_matches('/').to_string(),
                api_key: cli.pdns_api_key,
                server_id: cli.pdns_server_id,
            },
            upstream_timeout: Duration::from_secs(cli.pdns_timeout),
        }
    }
}
