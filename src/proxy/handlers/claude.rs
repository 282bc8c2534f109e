// Claude messages relay

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::Response,
};
use serde_json::Value;
use tracing::error;

use crate::proxy::common::utils::{error_response, generate_trace_id, rejection_response};
use crate::proxy::server::AppState;
use crate::proxy::upstream::client::UpstreamTarget;

/// Forward a Messages API request verbatim, adding `x-api-key` and `anthropic-version`.
pub async fn handle_messages(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let trace_id = generate_trace_id();

    let Some(api_key) = state.config.claude_key() else {
        error!("[{}] Claude API key not configured", trace_id);
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Claude API key not configured on the server",
        );
    };

    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            error!("[{}] Rejected Claude request body: {}", trace_id, rejection);
            return rejection_response(rejection);
        }
    };

    let target = UpstreamTarget {
        service: "Claude",
        url: &state.config.anthropic_url,
        auth_header: "x-api-key",
        credential: api_key,
        extra_headers: vec![("anthropic-version", state.config.anthropic_version.as_str())],
    };

    super::relay(&state.upstream, &target, &body, &trace_id).await
}
