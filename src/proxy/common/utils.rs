// Utility functions

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::error::UpstreamError;

/// Short lowercase id used to correlate the log lines of one request.
pub fn generate_trace_id() -> String {
    use rand::Rng;
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(6)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// `{"error": message}` with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// Map a forwarding failure to the response the caller sees.
pub fn upstream_error_response(err: &UpstreamError) -> Response {
    match err {
        UpstreamError::Status { body, .. } => (
            err.status_code(),
            Json(json!({
                "error": err.to_string(),
                "details": body,
            })),
        )
            .into_response(),
        _ => error_response(err.status_code(), err.to_string()),
    }
}

/// Inbound body that failed to parse as JSON.
pub fn rejection_response(rejection: JsonRejection) -> Response {
    error_response(rejection.status(), rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_trace_id() {
        let id = generate_trace_id();
        assert_eq!(id.len(), 6);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_status_error_carries_details() {
        let err = UpstreamError::Status {
            service: "Pinecone",
            status: StatusCode::NOT_FOUND,
            reason: "Not Found".to_string(),
            body: "index missing".to_string(),
        };
        let response = upstream_error_response(&err);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Pinecone API error: Not Found");
        assert_eq!(body["details"], "index missing");
    }
}
