// Handlers module - API endpoint handlers

pub mod claude;
pub mod meta;
pub mod pinecone;

use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::{error, info};

use crate::error::UpstreamError;
use crate::proxy::common::utils::upstream_error_response;
use crate::proxy::upstream::client::{UpstreamClient, UpstreamTarget};

/// Forward `body` to `target` and turn the outcome into the caller's response.
pub(crate) async fn relay<B: Serialize + ?Sized>(
    upstream: &UpstreamClient,
    target: &UpstreamTarget<'_>,
    body: &B,
    trace_id: &str,
) -> Response {
    info!("[{}] Proxying request to {} API", trace_id, target.service);

    match upstream.forward_json(target, body).await {
        Ok(data) => {
            info!(
                "[{}] {} API response received successfully",
                trace_id, target.service
            );
            Json(data).into_response()
        }
        Err(err) => {
            match &err {
                UpstreamError::Status { status, body, .. } => error!(
                    "[{}] {} API error ({}): {}",
                    trace_id,
                    target.service,
                    status.as_u16(),
                    body
                ),
                _ => error!(
                    "[{}] Error proxying to {} API: {}",
                    trace_id, target.service, err
                ),
            }
            upstream_error_response(&err)
        }
    }
}
