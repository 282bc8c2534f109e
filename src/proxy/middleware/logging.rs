// Request logging middleware
use axum::{extract::Request, middleware::Next, response::Response};
use tokio::time::Instant;

/// Log method, URI, status and latency of every request.
///
/// Only the request line is logged; headers may carry caller credentials.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    tracing::info!("Request: {} {}", method, uri);

    let response = next.run(request).await;

    tracing::info!(
        "Response: {} {} -> {} ({} ms)",
        method,
        uri,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );

    response
}
