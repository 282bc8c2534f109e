use clap::Parser;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};
use crate::proxy::config::{
    ProxyConfig, UpstreamProxyConfig, DEFAULT_ANTHROPIC_URL, DEFAULT_ANTHROPIC_VERSION,
    DEFAULT_HOST, DEFAULT_PINECONE_QUERY_URL, DEFAULT_PORT,
};

/// Command line flags, each with an environment fallback
#[derive(Parser, Debug, Clone)]
#[command(name = "api-relay")]
#[command(about = "Relay Claude and Pinecone API calls with server-held credentials")]
pub struct Args {
    /// Listen port
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    /// Listen address
    #[arg(long, default_value = DEFAULT_HOST, env = "HOST")]
    pub host: String,

    /// Anthropic API key
    #[arg(long, env = "CLAUDE_API_KEY", hide_env_values = true)]
    pub claude_api_key: Option<String>,

    /// Pinecone API key
    #[arg(long, env = "PINECONE_API_KEY", hide_env_values = true)]
    pub pinecone_api_key: Option<String>,

    /// Anthropic Messages endpoint
    #[arg(long, default_value = DEFAULT_ANTHROPIC_URL, env = "ANTHROPIC_API_URL")]
    pub anthropic_url: String,

    /// Value sent in the `anthropic-version` header
    #[arg(long, default_value = DEFAULT_ANTHROPIC_VERSION, env = "ANTHROPIC_VERSION")]
    pub anthropic_version: String,

    /// Pinecone index query endpoint
    #[arg(long, default_value = DEFAULT_PINECONE_QUERY_URL, env = "PINECONE_QUERY_URL")]
    pub pinecone_query_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = 120, env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,

    /// Outbound proxy for upstream calls (http://, https://, socks5://)
    #[arg(long, env = "UPSTREAM_PROXY_URL")]
    pub upstream_proxy: Option<String>,

    /// Directory for rolling log files (console only when unset)
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

/// Build the relay configuration from parsed flags
pub fn load_proxy_config(args: &Args) -> AppResult<ProxyConfig> {
    validate_upstream_url("anthropic-url", &args.anthropic_url)?;
    validate_upstream_url("pinecone-query-url", &args.pinecone_query_url)?;

    if args.request_timeout_secs == 0 {
        return Err(AppError::Config(
            "request-timeout-secs must be greater than 0".to_string(),
        ));
    }

    let upstream_proxy = match args.upstream_proxy.as_deref() {
        Some(url) if !url.is_empty() => UpstreamProxyConfig {
            enabled: true,
            url: url.to_string(),
        },
        _ => UpstreamProxyConfig::default(),
    };

    Ok(ProxyConfig {
        host: args.host.clone(),
        port: args.port,
        claude_api_key: args.claude_api_key.clone(),
        pinecone_api_key: args.pinecone_api_key.clone(),
        anthropic_url: args.anthropic_url.clone(),
        anthropic_version: args.anthropic_version.clone(),
        pinecone_query_url: args.pinecone_query_url.clone(),
        request_timeout: args.request_timeout_secs,
        upstream_proxy,
    })
}

fn validate_upstream_url(name: &str, value: &str) -> AppResult<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| AppError::Config(format!("Invalid {} {}: {}", name, value, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AppError::Config(format!(
            "Invalid {} {}: unsupported scheme {}",
            name, value, other
        ))),
    }
}
