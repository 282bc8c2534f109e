use crate::error::{AppError, AppResult};
use crate::proxy::config::ProxyConfig;
use crate::proxy::upstream::client::UpstreamClient;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

/// Axum application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> AppResult<Self> {
        let upstream = UpstreamClient::new(
            config.request_timeout,
            Some(config.upstream_proxy.clone()),
        )?;
        Ok(Self {
            config: Arc::new(config),
            upstream: Arc::new(upstream),
        })
    }
}

/// Build the relay routes
pub fn build_router(state: AppState) -> Router {
    use crate::proxy::handlers;

    Router::new()
        .route("/", get(handlers::meta::handle_root))
        .route("/health", get(handlers::meta::handle_health))
        .route("/api/claude", post(handlers::claude::handle_messages))
        .route(
            "/api/pinecone/query",
            post(handlers::pinecone::handle_query),
        )
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(
            crate::proxy::middleware::logging_middleware,
        ))
        .layer(crate::proxy::middleware::cors_layer())
        .with_state(state)
}

/// Axum server instance
pub struct AxumServer {
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl AxumServer {
    /// Start Axum server
    pub async fn start(config: ProxyConfig) -> AppResult<(Self, tokio::task::JoinHandle<()>)> {
        let addr = config.bind_address();
        let state = AppState::new(config)?;
        let app = build_router(state);

        // Bind address
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| {
                AppError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to bind address {}: {}", addr, e),
                ))
            })?;

        tracing::info!("Server running on http://{}", addr);

        // Create shutdown channel
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let server_instance = Self {
            shutdown_tx: Some(shutdown_tx),
        };

        // Start server in new task
        let handle = tokio::spawn(async move {
            use hyper::server::conn::http1;
            use hyper_util::rt::TokioIo;
            use hyper_util::service::TowerToHyperService;

            loop {
                tokio::select! {
                    res = listener.accept() => {
                        match res {
                            Ok((stream, _)) => {
                                let io = TokioIo::new(stream);
                                let service = TowerToHyperService::new(app.clone());

                                tokio::task::spawn(async move {
                                    if let Err(err) = http1::Builder::new()
                                        .serve_connection(io, service)
                                        .await
                                    {
                                        debug!("Connection handling finished or errored: {:?}", err);
                                    }
                                });
                            }
                            Err(e) => {
                                error!("Failed to accept connection: {:?}", e);
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::info!("Server stopped listening");
                        break;
                    }
                }
            }
        });

        Ok((server_instance, handle))
    }

    /// Stop server
    pub fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn test_server_serves_health_and_stops() {
        let reserved = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = reserved.local_addr().unwrap().port();
        drop(reserved);

        let config = ProxyConfig {
            host: "127.0.0.1".to_string(),
            port,
            ..Default::default()
        };
        let (server, handle) = AxumServer::start(config).await.unwrap();

        let body: Value = reqwest::get(format!("http://127.0.0.1:{}/health", port))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["claudeApiConfigured"], false);

        server.stop();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_start_fails_on_bad_upstream_proxy() {
        let mut config = ProxyConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..Default::default()
        };
        config.upstream_proxy.enabled = true;
        config.upstream_proxy.url = "http://[::1".to_string();

        assert!(matches!(
            AxumServer::start(config).await,
            Err(AppError::Config(_))
        ));
    }
}
