use clap::{Parser, builder::BoolishValueParser};
use oecd_core::SdmxClientConfig;
use oecd_mcp::server::McpHttpServerConfig;
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_SDMX_BASE_URL: &str = "https://sdmx.oecd.org/public/rest";
const DEFAULT_EXPLORER_URL: &str = "https://data-explorer.oecd.org/vis";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "oecd-mcpd", version, about = "OECD statistics MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "OECD_SDMX_BASE_URL", default_value = DEFAULT_SDMX_BASE_URL)]
    sdmx_base_url: String,

    #[arg(long, env = "OECD_EXPLORER_URL", default_value = DEFAULT_EXPLORER_URL)]
    explorer_url: String,

    /// Request timeout for SDMX calls; 0 disables it.
    #[arg(
        long,
        env = "OECD_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_HTTP_TIMEOUT_SECS
    )]
    http_timeout_secs: u64,

    #[arg(
        long = "stdio",
        env = "OECD_ENABLE_STDIO",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(long, env = "OECD_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        env = "OECD_MCP_STATEFUL",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    mcp_stateful: bool,

    /// Fallback log filter when `RUST_LOG` is unset.
    #[arg(long, env = "OECD_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct OecdConfig {
    pub sdmx_base_url: String,
    pub explorer_url: String,
    pub http_timeout: Option<Duration>,
    pub enable_stdio: bool,
    pub mcp_http_addr: SocketAddr,
    pub mcp_stateful: bool,
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value:?}")
            }
        }
    }
}

impl Error for ConfigError {}

impl OecdConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    pub fn sdmx_client_config(&self) -> SdmxClientConfig {
        SdmxClientConfig::new(self.sdmx_base_url.clone())
            .with_explorer_url(self.explorer_url.clone())
            .with_timeout(self.http_timeout)
    }

    pub const fn http_server_config(&self) -> McpHttpServerConfig {
        McpHttpServerConfig::new(self.mcp_http_addr).with_stateful_mode(self.mcp_stateful)
    }
}

fn non_blank(name: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidSetting { name, value });
    }
    Ok(trimmed.to_string())
}

impl TryFrom<CliArgs> for OecdConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let http_timeout = if args.http_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(args.http_timeout_secs))
        };

        Ok(Self {
            sdmx_base_url: non_blank("OECD_SDMX_BASE_URL", args.sdmx_base_url)?,
            explorer_url: non_blank("OECD_EXPLORER_URL", args.explorer_url)?,
            http_timeout,
            enable_stdio: args.enable_stdio,
            mcp_http_addr: args.mcp_http_addr,
            mcp_stateful: args.mcp_stateful,
            log_level: non_blank("OECD_LOG_LEVEL", args.log_level)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            sdmx_base_url: DEFAULT_SDMX_BASE_URL.to_string(),
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            enable_stdio: false,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
            mcp_stateful: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    #[test]
    fn defaults_parse() {
        let config = OecdConfig::try_from(base_args()).expect("config should parse");

        assert_eq!(config.sdmx_base_url, DEFAULT_SDMX_BASE_URL);
        assert_eq!(config.http_timeout, Some(Duration::from_secs(30)));
        assert!(!config.enable_stdio);
        assert_eq!(config.http_server_config().addr, config.mcp_http_addr);
    }

    #[test]
    fn zero_timeout_disables_it() {
        let mut args = base_args();
        args.http_timeout_secs = 0;

        let config = OecdConfig::try_from(args).expect("config should parse");

        assert!(config.http_timeout.is_none());
    }

    #[test]
    fn blank_urls_are_rejected() {
        let mut args = base_args();
        args.sdmx_base_url = "   ".to_string();

        let err = OecdConfig::try_from(args).expect_err("blank base url");

        assert!(matches!(
            err,
            ConfigError::InvalidSetting {
                name: "OECD_SDMX_BASE_URL",
                ..
            }
        ));
    }

    #[test]
    fn cli_flags_override_defaults() {
        let args = CliArgs::try_parse_from([
            "oecd-mcpd",
            "--stdio",
            "--http-timeout-secs",
            "5",
            "--explorer-url",
            "https://explorer.example/vis",
        ])
        .expect("flags should parse");

        let config = OecdConfig::try_from(args).expect("config should parse");

        assert!(config.enable_stdio);
        assert_eq!(config.http_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.explorer_url, "https://explorer.example/vis");
    }
}
