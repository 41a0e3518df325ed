//! Daemon entry point for the OECD statistics MCP server.
//!
//! Loads configuration from CLI arguments and the environment, builds the
//! SDMX-backed control plane, and serves MCP over stdio or streamable HTTP.

mod config;

use std::sync::Arc;

use oecd_core::{OecdControlPlane, SdmxClient, StatisticsSource};
use oecd_mcp::server::{serve_stdio, serve_streamable_http};
use tracing_subscriber::EnvFilter;

use crate::config::OecdConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = OecdConfig::from_args()?;
    init_tracing(&config);

    let sdmx = SdmxClient::new(config.sdmx_client_config())?;
    let source: Arc<dyn StatisticsSource> = Arc::new(OecdControlPlane::new(sdmx));
    tracing::info!(base_url = %config.sdmx_base_url, "oecd-mcpd starting");

    if config.enable_stdio {
        serve_stdio(source).await
    } else {
        serve_streamable_http(source, config.http_server_config()).await
    }
}

// stdout is reserved for the stdio transport.
fn init_tracing(config: &OecdConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
