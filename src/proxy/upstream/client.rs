// Upstream client implementation
// One shared reqwest client; every forward is a single POST with no retry

use reqwest::{header, Client};
use serde::Serialize;
use serde_json::Value;
use tokio::time::Duration;

use crate::error::{AppError, AppResult, UpstreamError};
use crate::proxy::config::UpstreamProxyConfig;

/// A single forwarding destination and the credential it needs.
#[derive(Debug, Clone)]
pub struct UpstreamTarget<'a> {
    /// Human readable service name used in error messages ("Claude", "Pinecone")
    pub service: &'static str,
    pub url: &'a str,
    /// Lowercase header name carrying the credential
    pub auth_header: &'static str,
    pub credential: &'a str,
    pub extra_headers: Vec<(&'static str, &'a str)>,
}

pub struct UpstreamClient {
    http_client: Client,
}

impl UpstreamClient {
    pub fn new(timeout_secs: u64, proxy_config: Option<UpstreamProxyConfig>) -> AppResult<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("api-relay/", env!("CARGO_PKG_VERSION")));

        if let Some(config) = proxy_config {
            if config.enabled && !config.url.is_empty() {
                let proxy = reqwest::Proxy::all(&config.url).map_err(|e| {
                    AppError::Config(format!("Invalid upstream proxy {}: {}", config.url, e))
                })?;
                builder = builder.proxy(proxy);
                tracing::info!("UpstreamClient enabled proxy: {}", config.url);
            }
        }

        let http_client = builder.build()?;

        Ok(Self { http_client })
    }

    fn build_headers(target: &UpstreamTarget<'_>) -> Result<header::HeaderMap, UpstreamError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            target.auth_header,
            header::HeaderValue::from_str(target.credential)
                .map_err(|_| UpstreamError::InvalidHeader(target.auth_header.to_string()))?,
        );
        for (name, value) in &target.extra_headers {
            headers.insert(
                *name,
                header::HeaderValue::from_str(value)
                    .map_err(|_| UpstreamError::InvalidHeader(name.to_string()))?,
            );
        }
        Ok(headers)
    }

    /// POST `body` to the target and return the parsed JSON reply.
    ///
    /// A non-success status comes back as [`UpstreamError::Status`] carrying the
    /// raw upstream body, so the caller can relay it.
    pub async fn forward_json<B: Serialize + ?Sized>(
        &self,
        target: &UpstreamTarget<'_>,
        body: &B,
    ) -> Result<Value, UpstreamError> {
        let headers = Self::build_headers(target)?;

        let response = self
            .http_client
            .post(target.url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.map_err(UpstreamError::Transport)?;
            return Err(UpstreamError::Status {
                service: target.service,
                status,
                reason: status
                    .canonical_reason()
                    .unwrap_or(status.as_str())
                    .to_string(),
                body: error_text,
            });
        }

        response.json::<Value>().await.map_err(UpstreamError::Decode)
    }
}
