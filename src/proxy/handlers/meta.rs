// Service metadata handlers: root descriptor and health check

use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::proxy::server::AppState;

pub const ENDPOINTS: [&str; 3] = ["/api/pinecone/query", "/api/claude", "/health"];

pub async fn handle_root() -> Response {
    Json(json!({
        "message": "API proxy server is running",
        "endpoints": ENDPOINTS,
    }))
    .into_response()
}

/// Health check handler
///
/// Reports which upstream credentials were present at startup, never their values.
pub async fn handle_health(State(state): State<AppState>) -> Response {
    Json(json!({
        "status": "ok",
        "pineconeApiConfigured": state.config.pinecone_key().is_some(),
        "claudeApiConfigured": state.config.claude_key().is_some(),
    }))
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::config::ProxyConfig;
    use crate::proxy::handlers::test_support::{body_json, router, send};
    use axum::{body::Body, http::Request, http::StatusCode};

    #[tokio::test]
    async fn test_root_lists_endpoints_regardless_of_input() {
        let request = Request::builder()
            .uri("/")
            .header("content-type", "text/plain")
            .body(Body::from("ignored"))
            .unwrap();
        let response = send(router(ProxyConfig::default()), request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "API proxy server is running");
        assert_eq!(
            body["endpoints"],
            json!(["/api/pinecone/query", "/api/claude", "/health"])
        );
    }

    #[tokio::test]
    async fn test_health_reflects_configured_keys() {
        let config = ProxyConfig {
            claude_api_key: Some("sk-ant".to_string()),
            ..Default::default()
        };
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = send(router(config), request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "status": "ok",
                "pineconeApiConfigured": false,
                "claudeApiConfigured": true
            })
        );
    }

    #[tokio::test]
    async fn test_health_with_no_keys() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let body = body_json(send(router(ProxyConfig::default()), request).await).await;
        assert_eq!(body["pineconeApiConfigured"], false);
        assert_eq!(body["claudeApiConfigured"], false);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/claude")
            .header("origin", "https://app.example.com")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type")
            .body(Body::empty())
            .unwrap();
        let response = send(router(ProxyConfig::default()), request).await;

        assert!(response.status().is_success());
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
        let methods = response.headers()["access-control-allow-methods"]
            .to_str()
            .unwrap()
            .to_string();
        assert!(methods.contains("POST"));
        assert!(methods.contains("OPTIONS"));
    }
}
