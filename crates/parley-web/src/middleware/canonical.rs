use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Permanently redirects `www.<canonical>` to the canonical host,
/// preserving path and query. Does nothing when no canonical host is
/// configured.
pub async fn canonical_host(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if let Some(canonical) = state.settings.canonical_host.as_deref() {
        let www = format!("www.{canonical}");
        let host = req
            .headers()
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if host == www {
            let scheme = req
                .headers()
                .get("x-forwarded-proto")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("https");
            let path_and_query = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            let location = format!("{scheme}://{canonical}{path_and_query}");
            tracing::info!(from = host, to = %location, "redirecting www to canonical host");
            return (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)])
                .into_response();
        }
    }
    next.run(req).await
}
