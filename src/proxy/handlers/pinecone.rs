// Pinecone index query relay

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::Response,
};
use tracing::error;

use crate::proxy::common::utils::{error_response, generate_trace_id, rejection_response};
use crate::proxy::mappers::pinecone::PineconeQuery;
use crate::proxy::server::AppState;
use crate::proxy::upstream::client::UpstreamTarget;

/// Forward a vector query to the configured index, adding the `Api-Key` header.
pub async fn handle_query(
    State(state): State<AppState>,
    body: Result<Json<PineconeQuery>, JsonRejection>,
) -> Response {
    let trace_id = generate_trace_id();

    let Some(api_key) = state.config.pinecone_key() else {
        error!("[{}] Pinecone API key not configured", trace_id);
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Pinecone API key not configured on the server",
        );
    };

    let Json(query) = match body {
        Ok(query) => query,
        Err(rejection) => {
            error!("[{}] Rejected Pinecone query body: {}", trace_id, rejection);
            return rejection_response(rejection);
        }
    };

    let target = UpstreamTarget {
        service: "Pinecone",
        url: &state.config.pinecone_query_url,
        auth_header: "api-key",
        credential: api_key,
        extra_headers: Vec::new(),
    };

    super::relay(&state.upstream, &target, &query, &trace_id).await
}
