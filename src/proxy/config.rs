use serde::Serialize;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_PINECONE_QUERY_URL: &str =
    "https://clarity-opensource-pdxguy4.svc.aped-4627-b74a.pinecone.io/query";

/// Relay configuration, built once at startup and shared read-only.
#[derive(Debug, Clone, Serialize)]
pub struct ProxyConfig {
    /// Listen address
    pub host: String,

    /// Listen port
    pub port: u16,

    /// Anthropic credential, sent as `x-api-key`
    #[serde(skip_serializing)]
    pub claude_api_key: Option<String>,

    /// Pinecone credential, sent as `Api-Key`
    #[serde(skip_serializing)]
    pub pinecone_api_key: Option<String>,

    pub anthropic_url: String,

    /// Value of the `anthropic-version` header
    pub anthropic_version: String,

    /// Full URL of the index `/query` endpoint
    pub pinecone_query_url: String,

    /// Upstream request timeout (seconds)
    pub request_timeout: u64,

    /// Outbound proxy for upstream calls
    pub upstream_proxy: UpstreamProxyConfig,
}

/// Outbound proxy configuration
#[derive(Debug, Clone, Serialize, Default)]
pub struct UpstreamProxyConfig {
    pub enabled: bool,
    /// Proxy address (http://, https://, socks5://)
    pub url: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            claude_api_key: None,
            pinecone_api_key: None,
            anthropic_url: DEFAULT_ANTHROPIC_URL.to_string(),
            anthropic_version: DEFAULT_ANTHROPIC_VERSION.to_string(),
            pinecone_query_url: DEFAULT_PINECONE_QUERY_URL.to_string(),
            request_timeout: default_request_timeout(),
            upstream_proxy: UpstreamProxyConfig::default(),
        }
    }
}

fn default_request_timeout() -> u64 {
    120
}

impl ProxyConfig {
    /// Claude credential, `None` when unset or empty.
    pub fn claude_key(&self) -> Option<&str> {
        non_empty(self.claude_api_key.as_deref())
    }

    /// Pinecone credential, `None` when unset or empty.
    pub fn pinecone_key(&self) -> Option<&str> {
        non_empty(self.pinecone_api_key.as_deref())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
