use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Request logging middleware.
///
/// Tags every request with a short id and logs method, path, status,
/// and latency as a structured event on completion.
pub async fn request_log(req: Request, next: Next) -> Response {
    let mut request_id = Uuid::new_v4().simple().to_string();
    request_id.truncate(8);
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}
